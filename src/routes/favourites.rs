use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::{catalog::PetList, ledger::PetRef},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Favourite,
    response::ApiResponse,
    services::ledger_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favourites).post(add_favourite))
        .route("/{pet_id}", delete(remove_favourite))
}

#[utoipa::path(
    get,
    path = "/api/favourites",
    responses(
        (status = 200, description = "List favourited pets", body = ApiResponse<PetList>),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
pub async fn list_favourites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = ledger_service::list_favourites(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/favourites",
    request_body = PetRef,
    responses(
        (status = 200, description = "Added to favourites (idempotent)", body = ApiResponse<Favourite>),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Pet not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
pub async fn add_favourite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PetRef>,
) -> AppResult<Json<ApiResponse<Favourite>>> {
    let resp = ledger_service::favourite(&state, &user, payload.pet_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/favourites/{pet_id}",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Removed from favourites", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Favourite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
pub async fn remove_favourite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(pet_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = ledger_service::unfavourite(&state, &user, pet_id).await?;
    Ok(Json(resp))
}
