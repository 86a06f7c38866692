use crate::domain::repository::UserRepository;
use crate::domain::types::Customer;
use crate::error::ParkingServiceError;

// ── ListCustomers ────────────────────────────────────────────────────────────

pub struct ListCustomersUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> ListCustomersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Customer>, ParkingServiceError> {
        self.users.list_customers().await
    }
}
