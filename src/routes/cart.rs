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
    models::Pet,
    response::ApiResponse,
    services::ledger_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(reserve_pet))
        .route("/{pet_id}", delete(release_pet))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Pets reserved by the current user", body = ApiResponse<PetList>),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = ledger_service::list_reserved(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = PetRef,
    responses(
        (status = 200, description = "Pet reserved", body = ApiResponse<Pet>),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Pet not found"),
        (status = 409, description = "Pet is already reserved"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn reserve_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PetRef>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = ledger_service::reserve(&state, &user, payload.pet_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{pet_id}",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Reservation released", body = ApiResponse<Pet>),
        (status = 403, description = "Reservation is held by another user"),
        (status = 404, description = "Pet not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn release_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Path(pet_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = ledger_service::release(&state, &user, pet_id).await?;
    Ok(Json(resp))
}
