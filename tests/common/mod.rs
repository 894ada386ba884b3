#![allow(dead_code)]

use chrono::Utc;
use pet_adoption_api::{
    config::AuthConfig,
    db::{create_orm_conn, run_migrations},
    dto::pets::{FlagInput, NumericInput, PetInput},
    entity::users::ActiveModel as UserActive,
    middleware::auth::AuthUser,
    models::{Pet, Role},
    services::pet_service,
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

/// A fresh, migrated in-memory store per test.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(
        orm,
        AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_ttl_hours: 1,
        },
    ))
}

pub async fn create_user(state: &AppState, role: Role) -> anyhow::Result<AuthUser> {
    let id = Uuid::new_v4();
    UserActive {
        id: Set(id),
        username: Set(format!("{}-{}", role, id.simple())),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set(role.as_str().to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser { user_id: id, role })
}

pub fn pet_input(name: &str, pet_type: &str, breed: &str, gender: &str) -> PetInput {
    PetInput {
        name: Some(name.to_string()),
        pet_type: Some(pet_type.to_string()),
        breed: Some(breed.to_string()),
        gender: Some(gender.to_string()),
        age_month: Some(NumericInput::Number(12.0)),
        health_condition: Some("good".to_string()),
        sterilisation_status: Some(FlagInput::Bool(false)),
        adoption_fee: Some(NumericInput::Number(50.0)),
        ..PetInput::default()
    }
}

pub async fn create_pet(state: &AppState, admin: &AuthUser, input: PetInput) -> anyhow::Result<Pet> {
    let resp = pet_service::create_pet(state, admin, input).await?;
    resp.data.ok_or_else(|| anyhow::anyhow!("create_pet returned no data"))
}
