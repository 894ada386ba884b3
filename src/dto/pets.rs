use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A number as submitted by an admin form: either a JSON number or text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Text(String),
}

/// Full attribute set of a pet and its condition, unvalidated.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PetInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub age_month: Option<NumericInput>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub weight: Option<NumericInput>,
    pub vaccination_date: Option<String>,
    pub health_condition: Option<String>,
    pub sterilisation_status: Option<FlagInput>,
    pub adoption_fee: Option<NumericInput>,
    pub previous_owner: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePetRequest {
    pub pet_id: Option<String>,
    #[serde(flatten)]
    pub pet: PetInput,
}
