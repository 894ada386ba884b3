//! Adoption status machine.
//!
//! ```text
//! Available --reserve--> Reserved --(checkout)--> Adopted
//!     ^                     |
//!     +------release--------+
//! ```
//!
//! `Adopted` is terminal and is entered by the checkout collaborator, never
//! by this crate. Viewers only see two states: a pet can be reserved, or it
//! is "Unavailable".

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    Available,
    Reserved,
    Adopted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("pet is not available (currently {0})")]
    NotAvailable(AdoptionStatus),
    #[error("pet is not reserved (currently {0})")]
    NotReserved(AdoptionStatus),
}

impl AdoptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Available => "available",
            AdoptionStatus::Reserved => "reserved",
            AdoptionStatus::Adopted => "adopted",
        }
    }

    pub fn can_reserve(&self) -> bool {
        matches!(self, AdoptionStatus::Available)
    }

    /// Label shown to browsing users.
    pub fn viewer_label(&self) -> &'static str {
        if self.can_reserve() {
            "Available"
        } else {
            "Unavailable"
        }
    }

    pub fn reserve(self) -> Result<Self, TransitionError> {
        match self {
            AdoptionStatus::Available => Ok(AdoptionStatus::Reserved),
            other => Err(TransitionError::NotAvailable(other)),
        }
    }

    pub fn release(self) -> Result<Self, TransitionError> {
        match self {
            AdoptionStatus::Reserved => Ok(AdoptionStatus::Available),
            other => Err(TransitionError::NotReserved(other)),
        }
    }
}

impl FromStr for AdoptionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(AdoptionStatus::Available),
            "reserved" => Ok(AdoptionStatus::Reserved),
            "adopted" => Ok(AdoptionStatus::Adopted),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
