//! Spot lifecycle: `Available -> Reserved -> Occupied -> Available`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a single parking spot.
///
/// Wire format: one-letter code (`A`, `R`, `O`) stored in `parking_spots.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotStatus {
    Available,
    Reserved,
    Occupied,
}

/// An action that moves a spot to its next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotAction {
    Reserve,
    Occupy,
    Release,
}

impl fmt::Display for SpotAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reserve => "reserve",
            Self::Occupy => "occupy",
            Self::Release => "release",
        })
    }
}

/// Returned when an action does not apply to the spot's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} a spot that is {from}")]
pub struct IllegalTransition {
    pub from: SpotStatus,
    pub action: SpotAction,
}

impl SpotStatus {
    pub const ALL: [SpotStatus; 3] = [Self::Available, Self::Reserved, Self::Occupied];

    /// Convert from the stored one-letter code. Returns `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Available),
            "R" => Some(Self::Reserved),
            "O" => Some(Self::Occupied),
            _ => None,
        }
    }

    /// Convert to the stored one-letter code.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Available => "A",
            Self::Reserved => "R",
            Self::Occupied => "O",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Occupied => "Occupied",
        }
    }

    /// Apply `action` and return the next status.
    pub fn apply(self, action: SpotAction) -> Result<Self, IllegalTransition> {
        match (self, action) {
            (Self::Available, SpotAction::Reserve) => Ok(Self::Reserved),
            (Self::Reserved, SpotAction::Occupy) => Ok(Self::Occupied),
            (Self::Occupied, SpotAction::Release) => Ok(Self::Available),
            (from, action) => Err(IllegalTransition { from, action }),
        }
    }

    pub fn reserve(self) -> Result<Self, IllegalTransition> {
        self.apply(SpotAction::Reserve)
    }

    pub fn occupy(self) -> Result<Self, IllegalTransition> {
        self.apply(SpotAction::Occupy)
    }

    pub fn release(self) -> Result<Self, IllegalTransition> {
        self.apply(SpotAction::Release)
    }

    /// `true` when an open reservation must exist for a spot in this status.
    pub fn is_held(self) -> bool {
        !matches!(self, Self::Available)
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}
