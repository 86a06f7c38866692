use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use parking_core::error::AppError;
use parking_core::flash::{Flash, redirect_with_flash};
use parking_domain::lot::LotValidationError;

/// Parking service error variants.
///
/// The display text of every rejection is the flash message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ParkingServiceError {
    #[error("parking lot not found")]
    LotNotFound,
    #[error("parking spot not found")]
    SpotNotFound,
    #[error("reservation not found")]
    ReservationNotFound,
    #[error("Email already registered.")]
    EmailAlreadyRegistered,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Please log in to access this page.")]
    Unauthenticated,
    #[error("Admins only! Access denied.")]
    AdminOnly,
    #[error("You already have an active reservation.")]
    ActiveReservationExists,
    #[error("Sorry, no spots are available in this lot.")]
    NoSpotAvailable,
    #[error("This is not your reservation.")]
    NotReservationOwner,
    #[error("This reservation cannot be occupied at this time.")]
    CannotOccupy,
    #[error("This reservation cannot be released at this time.")]
    CannotRelease,
    #[error("Cannot reduce spots. Some are still occupied.")]
    CannotShrinkLot,
    #[error("Cannot delete lot. Some spots are still occupied.")]
    LotHasOccupiedSpots,
    #[error("Only occupied spots can be released.")]
    SpotNotReleasable,
    #[error("The spot changed state in the meantime. Please try again.")]
    Conflict,
    #[error("{0}")]
    InvalidInput(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<LotValidationError> for ParkingServiceError {
    fn from(e: LotValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl ParkingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LotNotFound => "LOT_NOT_FOUND",
            Self::SpotNotFound => "SPOT_NOT_FOUND",
            Self::ReservationNotFound => "RESERVATION_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::AdminOnly => "ADMIN_ONLY",
            Self::ActiveReservationExists => "ACTIVE_RESERVATION_EXISTS",
            Self::NoSpotAvailable => "NO_SPOT_AVAILABLE",
            Self::NotReservationOwner => "NOT_RESERVATION_OWNER",
            Self::CannotOccupy => "CANNOT_OCCUPY",
            Self::CannotRelease => "CANNOT_RELEASE",
            Self::CannotShrinkLot => "CANNOT_SHRINK_LOT",
            Self::LotHasOccupiedSpots => "LOT_HAS_OCCUPIED_SPOTS",
            Self::SpotNotReleasable => "SPOT_NOT_RELEASABLE",
            Self::Conflict => "CONFLICT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LotNotFound | Self::SpotNotFound | Self::ReservationNotFound
        )
    }

    /// A business-rule rejection the user should see as a flash on the previous page.
    pub fn is_rejection(&self) -> bool {
        !self.is_not_found()
            && !matches!(
                self,
                Self::Unauthenticated | Self::AdminOnly | Self::Internal(_)
            )
    }

    /// Turn rejections into a flash + redirect to `to`; everything else propagates.
    pub fn flash_to(self, jar: CookieJar, to: &str) -> Result<Response, Self> {
        if self.is_rejection() {
            tracing::info!(kind = self.kind(), to, "request rejected");
            Ok(redirect_with_flash(jar, to, Flash::danger(self.to_string())))
        } else {
            Err(self)
        }
    }
}

impl IntoResponse for ParkingServiceError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => redirect_with_flash(
                CookieJar::new(),
                "/auth/login",
                Flash::info(self.to_string()),
            ),
            Self::AdminOnly => redirect_with_flash(
                CookieJar::new(),
                "/auth/login",
                Flash::danger(self.to_string()),
            ),
            Self::Internal(e) => AppError::Internal(e).into_response(),
            other if other.is_not_found() => AppError::NotFound(other.to_string()).into_response(),
            other => AppError::BadRequest(other.to_string()).into_response(),
        }
    }
}
