//! Per-user favourites and the reservation cart, plus the only code path
//! that moves a pet between `available` and `reserved`.
//!
//! The reservation row and `pets.adoption_status` are always written in the
//! same transaction. `reservations.pet_id` is unique, so even if two
//! transactions both observe an available pet only one insert can commit.

use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::catalog::PetList,
    entity::{
        favourites::{ActiveModel as FavouriteActive, Column as FavCol, Entity as Favourites, Model as FavouriteModel},
        pets::{ActiveModel as PetActive, Entity as Pets},
        reservations::{ActiveModel as ReservationActive, Column as ResCol, Entity as Reservations},
        users::Entity as Users,
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::AuthUser,
    models::{Favourite, Pet},
    response::{ApiResponse, Meta},
    services::catalog_service::{find_pet, find_pets},
    state::AppState,
    status::AdoptionStatus,
};

pub async fn favourite(
    state: &AppState,
    user: &AuthUser,
    pet_id: Uuid,
) -> AppResult<ApiResponse<Favourite>> {
    ensure_known_user(&state.orm, user).await?;
    if Pets::find_by_id(pet_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    if let Some(existing) = find_favourite(&state.orm, user.user_id, pet_id).await? {
        return Ok(ApiResponse::success(
            "Pet is already in favourites",
            favourite_from_entity(existing),
            Some(Meta::empty()),
        ));
    }

    let inserted = FavouriteActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        pet_id: Set(pet_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await;

    let favourite = match inserted {
        Ok(model) => model,
        // A concurrent request from the same user won; its row is ours too.
        Err(err) if is_unique_violation(&err) => find_favourite(&state.orm, user.user_id, pet_id)
            .await?
            .ok_or(AppError::Orm(err))?,
        Err(err) => return Err(err.into()),
    };

    audit::record(
        &state.orm,
        Some(user.user_id),
        "favourite_add",
        "favourites",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Pet added to favourites successfully",
        favourite_from_entity(favourite),
        Some(Meta::empty()),
    ))
}

pub async fn unfavourite(
    state: &AppState,
    user: &AuthUser,
    pet_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Favourites::delete_many()
        .filter(FavCol::UserId.eq(user.user_id))
        .filter(FavCol::PetId.eq(pet_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        Some(user.user_id),
        "favourite_remove",
        "favourites",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from favourites",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_favourites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PetList>> {
    let pet_ids: Vec<Uuid> = Favourites::find()
        .select_only()
        .column(FavCol::PetId)
        .filter(FavCol::UserId.eq(user.user_id))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let items = find_pets(&state.orm, &pet_ids).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", PetList { items }, Some(meta)))
}

/// `Available -> Reserved`. A pet that is reserved by anyone, including the
/// caller, or already adopted is rejected with `AlreadyReserved`.
pub async fn reserve(state: &AppState, user: &AuthUser, pet_id: Uuid) -> AppResult<ApiResponse<Pet>> {
    ensure_known_user(&state.orm, user).await?;

    let txn = state.orm.begin().await?;
    let pet = Pets::find_by_id(pet_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let current = stored_status(&pet.adoption_status)?;
    let next = current.reserve().map_err(|err| {
        tracing::info!(%pet_id, user_id = %user.user_id, %err, "reservation rejected");
        AppError::AlreadyReserved
    })?;

    ReservationActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        pet_id: Set(pet_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            tracing::info!(%pet_id, user_id = %user.user_id, "reservation lost race");
            AppError::AlreadyReserved
        } else {
            err.into()
        }
    })?;

    let mut active: PetActive = pet.into();
    active.adoption_status = Set(next.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    let pet = find_pet(&txn, pet_id).await?.ok_or(AppError::NotFound)?;
    txn.commit().await?;

    tracing::info!(%pet_id, user_id = %user.user_id, "pet reserved");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "reservation_add",
        "reservations",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Pet added to cart successfully",
        pet,
        Some(Meta::empty()),
    ))
}

/// `Reserved -> Available`. Only the holder of the reservation may release it.
pub async fn release(state: &AppState, user: &AuthUser, pet_id: Uuid) -> AppResult<ApiResponse<Pet>> {
    let txn = state.orm.begin().await?;
    let pet = Pets::find_by_id(pet_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let reservation = Reservations::find()
        .filter(ResCol::PetId.eq(pet_id))
        .one(&txn)
        .await?;
    let reservation = match reservation {
        Some(r) if r.user_id == user.user_id => r,
        _ => {
            tracing::warn!(%pet_id, user_id = %user.user_id, "release rejected: not the holder");
            return Err(AppError::NotOwner);
        }
    };

    let current = stored_status(&pet.adoption_status)?;
    let next = current.release().map_err(|err| {
        AppError::Internal(anyhow::anyhow!(
            "reservation {} exists but pet {pet_id}: {err}",
            reservation.id
        ))
    })?;

    reservation.delete(&txn).await?;

    let mut active: PetActive = pet.into();
    active.adoption_status = Set(next.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    let pet = find_pet(&txn, pet_id).await?.ok_or(AppError::NotFound)?;
    txn.commit().await?;

    tracing::info!(%pet_id, user_id = %user.user_id, "reservation released");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "reservation_remove",
        "reservations",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    Ok(ApiResponse::success("Removed from cart", pet, Some(Meta::empty())))
}

/// The caller's cart, read against current pet state.
pub async fn list_reserved(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<PetList>> {
    let pet_ids: Vec<Uuid> = Reservations::find()
        .select_only()
        .column(ResCol::PetId)
        .filter(ResCol::UserId.eq(user.user_id))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let items = find_pets(&state.orm, &pet_ids).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", PetList { items }, Some(meta)))
}

async fn ensure_known_user<C: ConnectionTrait>(conn: &C, user: &AuthUser) -> AppResult<()> {
    match Users::find_by_id(user.user_id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Unauthenticated),
    }
}

async fn find_favourite<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    pet_id: Uuid,
) -> AppResult<Option<FavouriteModel>> {
    let favourite = Favourites::find()
        .filter(FavCol::UserId.eq(user_id))
        .filter(FavCol::PetId.eq(pet_id))
        .one(conn)
        .await?;
    Ok(favourite)
}

fn stored_status(raw: &str) -> AppResult<AdoptionStatus> {
    raw.parse::<AdoptionStatus>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("pets.adoption_status: {e}")))
}

fn favourite_from_entity(model: FavouriteModel) -> Favourite {
    Favourite {
        id: model.id,
        user_id: model.user_id,
        pet_id: model.pet_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
