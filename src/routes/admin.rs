use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        ledger::ReservationList,
        pets::{PetInput, UpdatePetRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Pet,
    response::ApiResponse,
    services::pet_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", post(create_pet).put(update_pet))
        .route("/reservations", get(list_reservations))
}

#[utoipa::path(
    post,
    path = "/api/admin/pets",
    request_body = PetInput,
    responses(
        (status = 200, description = "Pet created", body = ApiResponse<Pet>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PetInput>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::create_pet(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/pets",
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet replaced", body = ApiResponse<Pet>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Pet not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdatePetRequest>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::update_pet(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/reservations",
    responses(
        (status = 200, description = "All active reservations", body = ApiResponse<ReservationList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ReservationList>>> {
    let resp = pet_service::list_reservations(&state, &user).await?;
    Ok(Json(resp))
}
