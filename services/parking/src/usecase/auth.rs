use anyhow::Context as _;

use parking_auth_types::password::{hash_password, verify_password};
use parking_auth_types::token::issue_session_token;
use parking_domain::user::{MIN_PASSWORD_LEN, UserRole, normalize_email, validate_email};

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::ParkingServiceError;

fn hash(password: &str) -> Result<String, ParkingServiceError> {
    hash_password(password)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))
        .map_err(ParkingServiceError::from)
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ParkingServiceError> {
        let email = normalize_email(&input.email);
        if !validate_email(&email) {
            return Err(ParkingServiceError::InvalidInput(
                "Please enter a valid email address.".to_owned(),
            ));
        }
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(ParkingServiceError::InvalidInput(
                "Full name is required.".to_owned(),
            ));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ParkingServiceError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ParkingServiceError::EmailAlreadyRegistered);
        }

        let user = self
            .users
            .create(&NewUser {
                email,
                full_name: full_name.to_owned(),
                password_hash: hash(&input.password)?,
                role: UserRole::User,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub session_token: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub users: R,
    pub session_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, ParkingServiceError> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(ParkingServiceError::InvalidCredentials)?;

        let verified = verify_password(password, &user.password_hash)
            .map_err(|e| anyhow::anyhow!("verify password of user {}: {e}", user.id))?;
        if !verified {
            return Err(ParkingServiceError::InvalidCredentials);
        }

        let (session_token, _exp) =
            issue_session_token(user.id, user.role.as_u8(), &self.session_secret)
                .context("issue session token")?;
        tracing::info!(user_id = user.id, admin = user.role.is_admin(), "user logged in");
        Ok(LoginOutput {
            user,
            session_token,
        })
    }
}

// ── EnsureAdmin ──────────────────────────────────────────────────────────────

/// Create the bootstrap admin account unless one with that email already exists.
pub struct EnsureAdminUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> EnsureAdminUseCase<R> {
    pub async fn execute(&self, email: &str, password: &str) -> Result<User, ParkingServiceError> {
        let email = normalize_email(email);
        if let Some(user) = self.users.find_by_email(&email).await? {
            if !user.role.is_admin() {
                tracing::warn!(user_id = user.id, "bootstrap admin email belongs to a regular user");
            }
            return Ok(user);
        }

        let user = self
            .users
            .create(&NewUser {
                email,
                full_name: "Admin".to_owned(),
                password_hash: hash(password)?,
                role: UserRole::Admin,
            })
            .await?;
        tracing::info!(user_id = user.id, "admin user created");
        Ok(user)
    }
}
