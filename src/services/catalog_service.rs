use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{PetFilter, PetList, SearchField},
    entity::{
        favourites::{Column as FavCol, Entity as Favourites},
        pet_conditions::{Column as CondCol, Entity as PetConditions, Model as ConditionModel},
        pets::{Column as PetCol, Entity as Pets, Model as PetModel},
    },
    error::{AppError, AppResult},
    models::{Condition as PetCondition, Pet},
    response::{ApiResponse, Meta},
    state::AppState,
    status::AdoptionStatus,
};

pub const TOP_FAVOURITED: usize = 3;

pub async fn list_pets(state: &AppState, filter: PetFilter) -> AppResult<ApiResponse<PetList>> {
    let items = search(&state.orm, &filter).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Pets", PetList { items }, Some(meta)))
}

pub async fn get_pet(state: &AppState, pet_id: Uuid) -> AppResult<ApiResponse<Pet>> {
    let pet = find_pet(&state.orm, pet_id).await?.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Pet", pet, None))
}

pub async fn top_favourited(state: &AppState, limit: usize) -> AppResult<ApiResponse<PetList>> {
    let counts: HashMap<Uuid, i64> = Favourites::find()
        .select_only()
        .column(FavCol::PetId)
        .column_as(Expr::col(FavCol::Id).count(), "favourite_count")
        .group_by(FavCol::PetId)
        .into_tuple::<(Uuid, i64)>()
        .all(&state.orm)
        .await?
        .into_iter()
        .collect();

    // Catalog order breaks ties; the sort is stable.
    let mut items = search(&state.orm, &PetFilter::default()).await?;
    items.sort_by_key(|pet| std::cmp::Reverse(counts.get(&pet.pet_id).copied().unwrap_or(0)));
    items.truncate(limit);

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Top pets", PetList { items }, Some(meta)))
}

/// Resolve a filter against the catalog, joined with each pet's condition.
///
/// Results are ordered by name, then id, so a fixed store state always
/// yields the same sequence. No matches is an empty vector, never an error.
pub async fn search<C: ConnectionTrait>(conn: &C, filter: &PetFilter) -> AppResult<Vec<Pet>> {
    let mut condition = Condition::all();

    if let Some(needle) = filter.needle() {
        // Matched against the folded `*_key` columns; SQL `LOWER` only folds
        // ASCII on some backends.
        let column = match filter.field {
            SearchField::Name => PetCol::NameKey,
            SearchField::Type => PetCol::PetTypeKey,
            SearchField::Breed => PetCol::BreedKey,
        };
        let pattern = format!("%{}%", escape_like(&search_key(needle)));
        condition = condition.add(
            Expr::col((Pets, column)).like(LikeExpr::new(pattern).escape('\\')),
        );
    }
    if let Some(gender) = filter.gender {
        condition = condition.add(PetCol::Gender.eq(gender.as_str()));
    }
    if let Some(health) = filter.health_condition {
        condition = condition.add(CondCol::HealthCondition.eq(health.as_str()));
    }
    if let Some(sterilised) = filter.sterilisation_status {
        condition = condition.add(CondCol::SterilisationStatus.eq(sterilised));
    }

    Pets::find()
        .find_also_related(PetConditions)
        .filter(condition)
        .order_by_asc(PetCol::Name)
        .order_by_asc(PetCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(|(pet, condition)| pet_from_entity(pet, condition))
        .collect()
}

pub async fn find_pet<C: ConnectionTrait>(conn: &C, pet_id: Uuid) -> AppResult<Option<Pet>> {
    Pets::find_by_id(pet_id)
        .find_also_related(PetConditions)
        .one(conn)
        .await?
        .map(|(pet, condition)| pet_from_entity(pet, condition))
        .transpose()
}

/// Load the given pets in catalog order. Unknown ids are skipped.
pub async fn find_pets<C: ConnectionTrait>(conn: &C, pet_ids: &[Uuid]) -> AppResult<Vec<Pet>> {
    if pet_ids.is_empty() {
        return Ok(Vec::new());
    }
    Pets::find()
        .find_also_related(PetConditions)
        .filter(PetCol::Id.is_in(pet_ids.iter().copied()))
        .order_by_asc(PetCol::Name)
        .order_by_asc(PetCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(|(pet, condition)| pet_from_entity(pet, condition))
        .collect()
}

pub(crate) fn pet_from_entity(model: PetModel, condition: Option<ConditionModel>) -> AppResult<Pet> {
    let adoption_status: AdoptionStatus = stored("pets.adoption_status", &model.adoption_status)?;
    Ok(Pet {
        pet_id: model.id,
        name: model.name,
        pet_type: stored("pets.pet_type", &model.pet_type)?,
        breed: model.breed,
        gender: stored("pets.gender", &model.gender)?,
        age_month: model.age_month,
        description: model.description,
        image: model.image,
        adoption_status,
        availability: adoption_status.viewer_label().to_string(),
        can_reserve: adoption_status.can_reserve(),
        condition_info: condition.map(condition_from_entity).transpose()?,
    })
}

fn condition_from_entity(model: ConditionModel) -> AppResult<PetCondition> {
    Ok(PetCondition {
        weight: model.weight,
        vaccination_date: model.vaccination_date.map(|dt| dt.with_timezone(&Utc)),
        health_condition: model
            .health_condition
            .as_deref()
            .map(|h| stored("pet_conditions.health_condition", h))
            .transpose()?,
        sterilisation_status: model.sterilisation_status,
        adoption_fee: model.adoption_fee,
        previous_owner: model.previous_owner,
    })
}

fn stored<T>(column: &str, raw: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("{column}: {e}")))
}

/// Case-folded form of a searchable attribute, stored next to it on write.
pub(crate) fn search_key(raw: &str) -> String {
    raw.to_lowercase()
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
