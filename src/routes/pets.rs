use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CatalogQuery, PetFilter, PetList},
    error::AppResult,
    models::Pet,
    response::ApiResponse,
    services::catalog_service::{self, TOP_FAVOURITED},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pets))
        .route("/top", get(top_pets))
        .route("/{pet_id}", get(get_pet))
}

#[utoipa::path(
    get,
    path = "/api/pets",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Filtered catalog", body = ApiResponse<PetList>),
        (status = 400, description = "Invalid filter field"),
    ),
    tag = "Pets"
)]
pub async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let filter = PetFilter::try_from(query)?;
    let resp = catalog_service::list_pets(&state, filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pets/top",
    responses(
        (status = 200, description = "Most favourited pets", body = ApiResponse<PetList>)
    ),
    tag = "Pets"
)]
pub async fn top_pets(State(state): State<AppState>) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = catalog_service::top_favourited(&state, TOP_FAVOURITED).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pets/{pet_id}",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet with condition", body = ApiResponse<Pet>),
        (status = 404, description = "Pet not found"),
    ),
    tag = "Pets"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = catalog_service::get_pet(&state, pet_id).await?;
    Ok(Json(resp))
}
