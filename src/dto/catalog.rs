use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    models::{Gender, HealthCondition, Pet},
};

/// Raw catalog query as it arrives on the wire. Every option is a string so
/// malformed values surface as `InvalidFilterField` rather than a generic
/// deserialization rejection.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Text matched case-insensitively against `field`.
    pub value: Option<String>,
    /// One of `name`, `type`, `breed`. Defaults to `name`.
    pub field: Option<String>,
    pub gender: Option<String>,
    pub health_condition: Option<String>,
    pub sterilisation_status: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Name,
    Type,
    Breed,
}

impl std::str::FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SearchField::Name),
            "type" => Ok(SearchField::Type),
            "breed" => Ok(SearchField::Breed),
            _ => Err(AppError::InvalidFilterField(s.to_string())),
        }
    }
}

/// A validated catalog filter. All active constraints are ANDed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PetFilter {
    pub value: String,
    pub field: SearchField,
    pub gender: Option<Gender>,
    pub health_condition: Option<HealthCondition>,
    pub sterilisation_status: Option<bool>,
}

impl PetFilter {
    pub fn by(field: SearchField, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            field,
            ..Self::default()
        }
    }

    /// The substring to look for, if the text constraint is active. A
    /// whitespace-only value is inactive; otherwise it is matched verbatim.
    pub fn needle(&self) -> Option<&str> {
        (!self.value.trim().is_empty()).then_some(self.value.as_str())
    }
}

impl TryFrom<CatalogQuery> for PetFilter {
    type Error = AppError;

    fn try_from(query: CatalogQuery) -> Result<Self, Self::Error> {
        let field = match present(query.field.as_deref()) {
            Some(field) => field.parse::<SearchField>()?,
            None => SearchField::Name,
        };
        let gender = present(query.gender.as_deref())
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(|e| AppError::InvalidFilterField(format!("gender={}", e.0)))?;
        let health_condition = present(query.health_condition.as_deref())
            .map(|h| h.parse::<HealthCondition>())
            .transpose()
            .map_err(|e| AppError::InvalidFilterField(format!("health_condition={}", e.0)))?;
        let sterilisation_status = present(query.sterilisation_status.as_deref())
            .map(|s| {
                parse_flag(s).ok_or_else(|| {
                    AppError::InvalidFilterField(format!("sterilisation_status={s}"))
                })
            })
            .transpose()?;

        Ok(Self {
            value: query.value.unwrap_or_default(),
            field,
            gender,
            health_condition,
            sterilisation_status,
        })
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts the spellings HTML forms and query strings use for booleans.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PetList {
    #[schema(value_type = Vec<Pet>)]
    pub items: Vec<Pet>,
}
