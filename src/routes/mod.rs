use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod doc;
pub mod favourites;
pub mod health;
pub mod pets;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/pets", pets::router())
        .nest("/auth", auth::router())
        .nest("/favourites", favourites::router())
        .nest("/cart", cart::router())
        .nest("/admin", admin::router())
}
