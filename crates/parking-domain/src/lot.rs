//! Parking lot details and capacity planning.

/// Upper bound on spots per lot.
pub const MAX_SPOTS_PER_LOT: u32 = 1000;

/// Maximum length of the pin (postal) code.
pub const MAX_PIN_CODE_LEN: usize = 10;

/// Validated, editable attributes of a parking lot.
#[derive(Debug, Clone, PartialEq)]
pub struct LotDetails {
    pub prime_location_name: String,
    pub address: String,
    pub pin_code: String,
    pub price_per_hour: f64,
    pub max_spots: u32,
}

/// Raw lot form fields as submitted by an admin.
#[derive(Debug, Clone, Default)]
pub struct LotDetailsInput<'a> {
    pub prime_location_name: &'a str,
    pub address: &'a str,
    pub pin_code: &'a str,
    pub price_per_hour: &'a str,
    pub max_spots: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LotValidationError {
    #[error("Location name is required.")]
    MissingName,
    #[error("Address is required.")]
    MissingAddress,
    #[error("Pin code must be 1 to {MAX_PIN_CODE_LEN} characters.")]
    InvalidPinCode,
    #[error("Price per hour must be a non-negative number.")]
    InvalidPrice,
    #[error("Maximum spots must be a whole number between 0 and {MAX_SPOTS_PER_LOT}.")]
    InvalidMaxSpots,
}

impl LotDetailsInput<'_> {
    pub fn parse(&self) -> Result<LotDetails, LotValidationError> {
        let prime_location_name = self.prime_location_name.trim();
        if prime_location_name.is_empty() {
            return Err(LotValidationError::MissingName);
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err(LotValidationError::MissingAddress);
        }
        let pin_code = self.pin_code.trim();
        if pin_code.is_empty() || pin_code.chars().count() > MAX_PIN_CODE_LEN {
            return Err(LotValidationError::InvalidPinCode);
        }
        let price_per_hour = self
            .price_per_hour
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or(LotValidationError::InvalidPrice)?;
        let max_spots = self
            .max_spots
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n <= MAX_SPOTS_PER_LOT)
            .ok_or(LotValidationError::InvalidMaxSpots)?;
        Ok(LotDetails {
            prime_location_name: prime_location_name.to_owned(),
            address: address.to_owned(),
            pin_code: pin_code.to_owned(),
            price_per_hour,
            max_spots,
        })
    }
}

/// What a capacity edit does to a lot's spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityChange {
    Unchanged,
    /// Append this many Available spots.
    Grow(u32),
    /// Remove this many Available, never-reserved spots.
    Shrink(u32),
}

impl CapacityChange {
    pub fn between(current_spots: u32, requested: u32) -> Self {
        match requested.cmp(&current_spots) {
            std::cmp::Ordering::Greater => Self::Grow(requested - current_spots),
            std::cmp::Ordering::Less => Self::Shrink(current_spots - requested),
            std::cmp::Ordering::Equal => Self::Unchanged,
        }
    }
}
