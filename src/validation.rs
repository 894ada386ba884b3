//! Admin input validation for pet create/update.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    dto::{
        catalog::parse_flag,
        pets::{FlagInput, NumericInput, PetInput},
    },
    error::{AppError, AppResult},
    models::{Condition, Gender, HealthCondition, PetType},
};

/// The mutable attribute set of a pet after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPet {
    pub name: String,
    pub pet_type: PetType,
    pub breed: String,
    pub gender: Gender,
    pub age_month: i32,
    pub description: String,
    pub image: String,
    pub condition: Condition,
}

pub fn validate_pet(input: PetInput) -> AppResult<ValidPet> {
    let name = required(input.name.as_deref(), "name")?.to_string();
    let pet_type = parse_enum::<PetType>(required(input.pet_type.as_deref(), "type")?, "type")?;
    let gender = parse_enum::<Gender>(required(input.gender.as_deref(), "gender")?, "gender")?;

    let age_month = match optional_number(input.age_month.as_ref(), "age_month")? {
        Some(age) if age.fract() != 0.0 || age > f64::from(i32::MAX) => {
            return Err(AppError::InvalidNumericField("age_month"));
        }
        Some(age) => age as i32,
        None => 0,
    };

    let weight = optional_number(input.weight.as_ref(), "weight")?;
    let adoption_fee = optional_number(input.adoption_fee.as_ref(), "adoption_fee")?
        .map(round_cents)
        .unwrap_or(0.0);
    if !adoption_fee.is_finite() {
        return Err(AppError::InvalidNumericField("adoption_fee"));
    }
    let vaccination_date = optional(input.vaccination_date.as_deref())
        .map(parse_timestamp)
        .transpose()?;
    let health_condition = optional(input.health_condition.as_deref())
        .map(|h| parse_enum::<HealthCondition>(h, "health_condition"))
        .transpose()?;
    let sterilisation_status = match input.sterilisation_status {
        None => false,
        Some(FlagInput::Bool(flag)) => flag,
        Some(FlagInput::Text(text)) if text.trim().is_empty() => false,
        Some(FlagInput::Text(text)) => parse_flag(&text).ok_or(AppError::InvalidEnumValue {
            field: "sterilisation_status",
            value: text,
        })?,
    };

    Ok(ValidPet {
        name,
        pet_type,
        breed: trimmed(input.breed),
        gender,
        age_month,
        description: trimmed(input.description),
        image: trimmed(input.image),
        condition: Condition {
            weight,
            vaccination_date,
            health_condition,
            sterilisation_status,
            adoption_fee,
            previous_owner: optional(input.previous_owner.as_deref()).map(str::to_string),
        },
    })
}

/// Normalise an admin-supplied timestamp to a UTC instant.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read as UTC) and a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    const LOCAL_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

fn required<'a>(raw: Option<&'a str>, field: &'static str) -> AppResult<&'a str> {
    optional(raw).ok_or(AppError::MissingField(field))
}

fn optional(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn trimmed(raw: Option<String>) -> String {
    optional(raw.as_deref()).unwrap_or_default().to_string()
}

fn parse_enum<T: std::str::FromStr>(raw: &str, field: &'static str) -> AppResult<T> {
    raw.parse::<T>().map_err(|_| AppError::InvalidEnumValue {
        field,
        value: raw.to_string(),
    })
}

fn optional_number(input: Option<&NumericInput>, field: &'static str) -> AppResult<Option<f64>> {
    let value = match input {
        None => return Ok(None),
        Some(NumericInput::Number(n)) => *n,
        Some(NumericInput::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(NumericInput::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::InvalidNumericField(field))?,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidNumericField(field));
    }
    Ok(Some(value))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn input() -> PetInput {
        PetInput {
            name: Some("Max".into()),
            pet_type: Some("Dog".into()),
            gender: Some("Male".into()),
            ..PetInput::default()
        }
    }

    #[test]
    fn minimal_input_gets_defaults() {
        let pet = validate_pet(input()).unwrap();
        assert_eq!(pet.name, "Max");
        assert_eq!(pet.pet_type, PetType::Dog);
        assert_eq!(pet.age_month, 0);
        assert_eq!(pet.condition.adoption_fee, 0.0);
        assert!(!pet.condition.sterilisation_status);
        assert_eq!(pet.condition.vaccination_date, None);
    }

    #[test]
    fn required_fields_must_be_present() {
        let err = validate_pet(PetInput {
            name: Some("  ".into()),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::MissingField("name")));

        let err = validate_pet(PetInput {
            gender: None,
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::MissingField("gender")));
    }

    #[test]
    fn enum_members_are_enforced() {
        let err = validate_pet(PetInput {
            pet_type: Some("Hamster".into()),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidEnumValue { field: "type", .. }));

        let err = validate_pet(PetInput {
            health_condition: Some("fine".into()),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidEnumValue {
                field: "health_condition",
                ..
            }
        ));
    }

    #[test]
    fn negative_age_is_rejected() {
        let err = validate_pet(PetInput {
            age_month: Some(NumericInput::Text("-1".into())),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidNumericField("age_month")));
    }

    #[test]
    fn numeric_fields_accept_text_and_numbers() {
        let pet = validate_pet(PetInput {
            age_month: Some(NumericInput::Text("14".into())),
            weight: Some(NumericInput::Number(7.5)),
            adoption_fee: Some(NumericInput::Text("120.456".into())),
            ..input()
        })
        .unwrap();
        assert_eq!(pet.age_month, 14);
        assert_eq!(pet.condition.weight, Some(7.5));
        assert_eq!(pet.condition.adoption_fee, 120.46);

        for bad in ["abc", "NaN", "-0.5"] {
            let err = validate_pet(PetInput {
                weight: Some(NumericInput::Text(bad.into())),
                ..input()
            })
            .unwrap_err();
            assert!(matches!(err, AppError::InvalidNumericField("weight")), "{bad}");
        }

        let err = validate_pet(PetInput {
            age_month: Some(NumericInput::Number(2.5)),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidNumericField("age_month")));
    }

    #[test]
    fn fee_that_overflows_when_rounded_is_rejected() {
        let err = validate_pet(PetInput {
            adoption_fee: Some(NumericInput::Text("1e307".into())),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidNumericField("adoption_fee")));
    }

    #[test]
    fn sterilisation_accepts_form_text() {
        let pet = validate_pet(PetInput {
            sterilisation_status: Some(FlagInput::Text("Yes".into())),
            ..input()
        })
        .unwrap();
        assert!(pet.condition.sterilisation_status);

        let err = validate_pet(PetInput {
            sterilisation_status: Some(FlagInput::Text("perhaps".into())),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidEnumValue { .. }));
    }

    #[test]
    fn timestamps_are_normalised_to_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T10:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T18:30:00+08:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        for bad in ["yesterday", "2024-13-01", "01/03/2024"] {
            let err = parse_timestamp(bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidDate(_)), "{bad}");
        }
        let err = validate_pet(PetInput {
            vaccination_date: Some("soon".into()),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }
}
