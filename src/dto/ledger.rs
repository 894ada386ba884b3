use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Pet, Reservation};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PetRef {
    pub pet_id: Uuid,
}

/// A reservation together with the current state of the held pet.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationEntry {
    pub reservation: Reservation,
    pub pet: Pet,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReservationList {
    #[schema(value_type = Vec<ReservationEntry>)]
    pub items: Vec<ReservationEntry>,
}
