mod common;

use common::{create_pet, create_user, pet_input, setup_state};
use pet_adoption_api::{
    dto::{
        catalog::{CatalogQuery, PetFilter, SearchField},
        pets::FlagInput,
    },
    error::AppError,
    models::{Gender, HealthCondition, Role},
    services::{catalog_service, ledger_service},
    state::AppState,
    status::AdoptionStatus,
};

async fn names(state: &AppState, filter: PetFilter) -> anyhow::Result<Vec<String>> {
    let resp = catalog_service::list_pets(state, filter).await?;
    let list = resp.data.expect("pet list");
    Ok(list.items.into_iter().map(|p| p.name).collect())
}

#[tokio::test]
async fn name_search_is_case_insensitive_substring() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;
    create_pet(&state, &admin, pet_input("Mimi", "Cat", "Persian", "Female")).await?;

    assert_eq!(names(&state, PetFilter::by(SearchField::Name, "ma")).await?, ["Max"]);
    assert_eq!(names(&state, PetFilter::by(SearchField::Name, "MI")).await?, ["Mimi"]);
    assert_eq!(names(&state, PetFilter::by(SearchField::Name, "")).await?, ["Max", "Mimi"]);
    assert!(names(&state, PetFilter::by(SearchField::Name, "zzz")).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn type_and_breed_fields_are_searchable() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;
    create_pet(&state, &admin, pet_input("Mimi", "Cat", "Persian", "Female")).await?;
    create_pet(&state, &admin, pet_input("Rex", "Dog", "Boxer", "Male")).await?;

    assert_eq!(
        names(&state, PetFilter::by(SearchField::Type, "dog")).await?,
        ["Max", "Rex"]
    );
    assert_eq!(
        names(&state, PetFilter::by(SearchField::Breed, "pers")).await?,
        ["Mimi"]
    );
    // LIKE wildcards in the needle are literal.
    assert!(names(&state, PetFilter::by(SearchField::Name, "%")).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn attribute_constraints_are_anded() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;
    create_pet(
        &state,
        &admin,
        pet_input("Mimi", "Cat", "Persian", "Female"),
    )
    .await?;
    let mut luna = pet_input("Luna", "Cat", "Siamese", "Female");
    luna.health_condition = Some("bad".into());
    luna.sterilisation_status = Some(FlagInput::Bool(true));
    create_pet(&state, &admin, luna).await?;

    let by_gender = PetFilter {
        gender: Some(Gender::Female),
        ..PetFilter::default()
    };
    assert_eq!(names(&state, by_gender).await?, ["Luna", "Mimi"]);

    let healthy_females = PetFilter {
        gender: Some(Gender::Female),
        health_condition: Some(HealthCondition::Good),
        ..PetFilter::default()
    };
    assert_eq!(names(&state, healthy_females).await?, ["Mimi"]);

    let sterilised = PetFilter {
        sterilisation_status: Some(true),
        ..PetFilter::default()
    };
    assert_eq!(names(&state, sterilised).await?, ["Luna"]);

    let none = PetFilter {
        value: "max".into(),
        gender: Some(Gender::Female),
        ..PetFilter::default()
    };
    assert!(names(&state, none).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_search_field_is_rejected_before_querying() {
    let err = PetFilter::try_from(CatalogQuery {
        value: Some("max".into()),
        field: Some("colour".into()),
        ..CatalogQuery::default()
    })
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidFilterField(_)));
}

#[tokio::test]
async fn reserved_pets_stay_listed_but_unavailable() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    let user = create_user(&state, Role::User).await?;
    let max = create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;
    assert!(max.can_reserve);
    assert_eq!(max.availability, "Available");

    ledger_service::reserve(&state, &user, max.pet_id).await?;

    let pet = catalog_service::get_pet(&state, max.pet_id)
        .await?
        .data
        .expect("pet");
    assert_eq!(pet.adoption_status, AdoptionStatus::Reserved);
    assert_eq!(pet.availability, "Unavailable");
    assert!(!pet.can_reserve);
    let condition = pet.condition_info.expect("condition");
    assert_eq!(condition.adoption_fee, 50.0);
    assert_eq!(condition.health_condition, Some(HealthCondition::Good));

    assert_eq!(names(&state, PetFilter::default()).await?, ["Max"]);
    Ok(())
}

#[tokio::test]
async fn get_pet_reports_unknown_ids() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let err = catalog_service::get_pet(&state, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn top_favourited_orders_by_count_then_catalog_order() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    let alice = create_user(&state, Role::User).await?;
    let bob = create_user(&state, Role::User).await?;

    let max = create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;
    let mimi = create_pet(&state, &admin, pet_input("Mimi", "Cat", "Persian", "Female")).await?;
    create_pet(&state, &admin, pet_input("Bella", "Dog", "Boxer", "Female")).await?;
    create_pet(&state, &admin, pet_input("Coco", "Bird", "Budgie", "Male")).await?;

    ledger_service::favourite(&state, &alice, mimi.pet_id).await?;
    ledger_service::favourite(&state, &bob, mimi.pet_id).await?;
    ledger_service::favourite(&state, &alice, max.pet_id).await?;

    let top = catalog_service::top_favourited(&state, catalog_service::TOP_FAVOURITED)
        .await?
        .data
        .expect("top list");
    let names: Vec<_> = top.items.into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Mimi", "Max", "Bella"]);
    Ok(())
}

#[tokio::test]
async fn name_search_folds_non_ascii_case() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    create_pet(&state, &admin, pet_input("Émile", "Cat", "Chartreux", "Male")).await?;
    create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;

    for needle in ["Émile", "émile", "ÉMILE", "mile"] {
        assert_eq!(
            names(&state, PetFilter::by(SearchField::Name, needle)).await?,
            ["Émile"],
            "{needle}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn needle_whitespace_is_part_of_the_match() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    create_pet(&state, &admin, pet_input("Max Jr", "Dog", "Beagle", "Male")).await?;
    create_pet(&state, &admin, pet_input("Maxi", "Dog", "Boxer", "Female")).await?;

    assert_eq!(
        names(&state, PetFilter::by(SearchField::Name, "max ")).await?,
        ["Max Jr"]
    );
    assert_eq!(
        names(&state, PetFilter::by(SearchField::Name, "   ")).await?,
        ["Max Jr", "Maxi"]
    );
    Ok(())
}

#[tokio::test]
async fn renamed_pets_are_found_by_their_new_name() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin).await?;
    let pet = create_pet(&state, &admin, pet_input("Max", "Dog", "Beagle", "Male")).await?;

    pet_adoption_api::services::pet_service::update_pet(
        &state,
        &admin,
        pet_adoption_api::dto::pets::UpdatePetRequest {
            pet_id: Some(pet.pet_id.to_string()),
            pet: pet_input("Éclair", "Cat", "Siamese", "Male"),
        },
    )
    .await?;

    assert!(names(&state, PetFilter::by(SearchField::Name, "max")).await?.is_empty());
    assert_eq!(
        names(&state, PetFilter::by(SearchField::Name, "éclair")).await?,
        ["Éclair"]
    );
    assert_eq!(
        names(&state, PetFilter::by(SearchField::Type, "CAT")).await?,
        ["Éclair"]
    );
    Ok(())
}
