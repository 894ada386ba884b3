use chrono::Utc;
use pet_adoption_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::pets::{FlagInput, NumericInput, PetInput},
    entity::{
        Pets,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    middleware::auth::AuthUser,
    models::Role,
    services::{auth_service::hash_password, pet_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin", "admin123", Role::Admin).await?;
    let user_id = ensure_user(&orm, "user", "user123", Role::User).await?;

    let state = AppState::new(orm, config.auth());
    seed_pets(&state, admin_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    username: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(orm)
        .await?
    {
        println!("User {username} already exists");
        return Ok(existing.id);
    }

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role.as_str().to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured user {username} (role={role})");
    Ok(user.id)
}

async fn seed_pets(state: &AppState, admin_id: Uuid) -> anyhow::Result<()> {
    if Pets::find().count(&state.orm).await? > 0 {
        println!("Pets already seeded");
        return Ok(());
    }

    let admin = AuthUser {
        user_id: admin_id,
        role: Role::Admin,
    };
    let pets = [
        ("Max", "Dog", "Golden Retriever", "Male", 14, "good", true, 150.0),
        ("Mimi", "Cat", "Persian", "Female", 8, "good", false, 90.0),
        ("Thumper", "Rabbit", "Holland Lop", "Male", 5, "good", true, 40.0),
        ("Kiwi", "Bird", "Budgerigar", "Female", 11, "bad", false, 25.0),
    ];

    for (name, pet_type, breed, gender, age, health, sterilised, fee) in pets {
        let input = PetInput {
            name: Some(name.into()),
            pet_type: Some(pet_type.into()),
            breed: Some(breed.into()),
            gender: Some(gender.into()),
            age_month: Some(NumericInput::Number(f64::from(age))),
            description: Some(format!("{name} is looking for a home.")),
            health_condition: Some(health.into()),
            sterilisation_status: Some(FlagInput::Bool(sterilised)),
            adoption_fee: Some(NumericInput::Number(fee)),
            ..PetInput::default()
        };
        pet_service::create_pet(state, &admin, input).await?;
    }

    println!("Seeded pets");
    Ok(())
}
