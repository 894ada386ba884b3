use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        ledger::{ReservationEntry, ReservationList},
        pets::{PetInput, UpdatePetRequest},
    },
    entity::{
        pet_conditions::{ActiveModel as ConditionActive, Entity as PetConditions},
        pets::{ActiveModel as PetActive, Entity as Pets},
        reservations::{Column as ResCol, Entity as Reservations},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Condition, Pet, Reservation},
    response::{ApiResponse, Meta},
    services::catalog_service::{find_pet, find_pets, search_key},
    state::AppState,
    status::AdoptionStatus,
    validation::{ValidPet, validate_pet},
};

/// Create a pet and its condition record together. New pets are `available`.
pub async fn create_pet(
    state: &AppState,
    user: &AuthUser,
    payload: PetInput,
) -> AppResult<ApiResponse<Pet>> {
    ensure_admin(user)?;
    let valid = validate_pet(payload)?;

    let pet_id = Uuid::new_v4();
    let now = Utc::now();
    let txn = state.orm.begin().await?;

    PetActive {
        id: Set(pet_id),
        name: Set(valid.name.clone()),
        pet_type: Set(valid.pet_type.as_str().to_string()),
        breed: Set(valid.breed.clone()),
        gender: Set(valid.gender.as_str().to_string()),
        age_month: Set(valid.age_month),
        description: Set(valid.description.clone()),
        image: Set(valid.image.clone()),
        adoption_status: Set(AdoptionStatus::Available.as_str().to_string()),
        name_key: Set(search_key(&valid.name)),
        pet_type_key: Set(search_key(valid.pet_type.as_str())),
        breed_key: Set(search_key(&valid.breed)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    condition_active(pet_id, &valid.condition).insert(&txn).await?;

    let pet = find_pet(&txn, pet_id).await?.ok_or(AppError::NotFound)?;
    txn.commit().await?;

    tracing::info!(%pet_id, name = %pet.name, "pet created");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "pet_create",
        "pets",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    Ok(ApiResponse::success(
        format!("{} has been added.", pet.name),
        pet,
        Some(Meta::empty()),
    ))
}

/// Replace every mutable attribute of a pet and its condition.
///
/// `pet_id`, `adoption_status` and the favourite/reservation relations are
/// never touched here.
pub async fn update_pet(
    state: &AppState,
    user: &AuthUser,
    payload: UpdatePetRequest,
) -> AppResult<ApiResponse<Pet>> {
    ensure_admin(user)?;
    let raw_id = payload
        .pet_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(AppError::MissingField("pet_id"))?;
    let pet_id = Uuid::parse_str(raw_id).map_err(|_| AppError::NotFound)?;
    let valid = validate_pet(payload.pet)?;

    let txn = state.orm.begin().await?;
    let existing = Pets::find_by_id(pet_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: PetActive = existing.into();
    apply(&mut active, &valid);
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    let condition = condition_active(pet_id, &valid.condition);
    match PetConditions::find_by_id(pet_id).one(&txn).await? {
        Some(_) => {
            condition.update(&txn).await?;
        }
        None => {
            condition.insert(&txn).await?;
        }
    }

    let pet = find_pet(&txn, pet_id).await?.ok_or(AppError::NotFound)?;
    txn.commit().await?;

    tracing::info!(%pet_id, "pet updated");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "pet_update",
        "pets",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    Ok(ApiResponse::success(
        format!("{} has been updated.", pet.name),
        pet,
        Some(Meta::empty()),
    ))
}

/// Every active reservation with its holder, oldest first.
pub async fn list_reservations(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ReservationList>> {
    ensure_admin(user)?;
    let reservations = Reservations::find()
        .order_by_asc(ResCol::CreatedAt)
        .order_by_asc(ResCol::Id)
        .all(&state.orm)
        .await?;

    let pet_ids: Vec<Uuid> = reservations.iter().map(|r| r.pet_id).collect();
    let mut pets: HashMap<Uuid, Pet> = find_pets(&state.orm, &pet_ids)
        .await?
        .into_iter()
        .map(|pet| (pet.pet_id, pet))
        .collect();

    let items: Vec<ReservationEntry> = reservations
        .into_iter()
        .filter_map(|model| {
            let pet = pets.remove(&model.pet_id)?;
            Some(ReservationEntry {
                reservation: Reservation {
                    id: model.id,
                    user_id: model.user_id,
                    pet_id: model.pet_id,
                    created_at: model.created_at.with_timezone(&Utc),
                },
                pet,
            })
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Reservations",
        ReservationList { items },
        Some(meta),
    ))
}

fn apply(active: &mut PetActive, valid: &ValidPet) {
    active.name = Set(valid.name.clone());
    active.pet_type = Set(valid.pet_type.as_str().to_string());
    active.breed = Set(valid.breed.clone());
    active.gender = Set(valid.gender.as_str().to_string());
    active.age_month = Set(valid.age_month);
    active.description = Set(valid.description.clone());
    active.image = Set(valid.image.clone());
    active.name_key = Set(search_key(&valid.name));
    active.pet_type_key = Set(search_key(valid.pet_type.as_str()));
    active.breed_key = Set(search_key(&valid.breed));
}

fn condition_active(pet_id: Uuid, condition: &Condition) -> ConditionActive {
    ConditionActive {
        pet_id: Set(pet_id),
        weight: Set(condition.weight),
        vaccination_date: Set(condition.vaccination_date.map(Into::into)),
        health_condition: Set(condition.health_condition.map(|h| h.as_str().to_string())),
        sterilisation_status: Set(condition.sterilisation_status),
        adoption_fee: Set(condition.adoption_fee),
        previous_owner: Set(condition.previous_owner.clone()),
    }
}
