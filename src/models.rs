use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::status::AdoptionStatus;

/// Returned when a stored or submitted string names no variant of a text enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

// Enums persisted as their canonical text. Parsing ignores ASCII case so
// "dog" and "DOG" both resolve to `PetType::Dog`.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownVariant(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(PetType {
    Rabbit => "Rabbit",
    Dog => "Dog",
    Cat => "Cat",
    Bird => "Bird",
});

text_enum!(Gender {
    Male => "Male",
    Female => "Female",
});

text_enum!(HealthCondition {
    Good => "good",
    Bad => "bad",
});

text_enum!(Role {
    Admin => "admin",
    User => "user",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Medical and ownership metadata attached 1:1 to a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub weight: Option<f64>,
    pub vaccination_date: Option<DateTime<Utc>>,
    pub health_condition: Option<HealthCondition>,
    pub sterilisation_status: bool,
    pub adoption_fee: f64,
    pub previous_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub pet_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub breed: String,
    pub gender: Gender,
    pub age_month: i32,
    pub description: String,
    pub image: String,
    pub adoption_status: AdoptionStatus,
    /// "Available" or "Unavailable"; reserved and adopted pets look the same to viewers.
    pub availability: String,
    pub can_reserve: bool,
    pub condition_info: Option<Condition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Favourite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_enums_parse_case_insensitively() {
        assert_eq!("dog".parse::<PetType>(), Ok(PetType::Dog));
        assert_eq!(" Female ".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("GOOD".parse::<HealthCondition>(), Ok(HealthCondition::Good));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = "Hamster".parse::<PetType>().unwrap_err();
        assert_eq!(err, UnknownVariant("Hamster".into()));
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn pet_type_serializes_under_type_key() {
        let pet = Pet {
            pet_id: Uuid::nil(),
            name: "Max".into(),
            pet_type: PetType::Dog,
            breed: String::new(),
            gender: Gender::Male,
            age_month: 3,
            description: String::new(),
            image: String::new(),
            adoption_status: AdoptionStatus::Available,
            availability: "Available".into(),
            can_reserve: true,
            condition_info: None,
        };
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(value["type"], "Dog");
        assert_eq!(value["gender"], "Male");
        assert_eq!(value["adoption_status"], "available");
    }
}
