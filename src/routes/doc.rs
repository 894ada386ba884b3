use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        catalog::{CatalogQuery, PetList},
        ledger::{PetRef, ReservationEntry, ReservationList},
        pets::{FlagInput, NumericInput, PetInput, UpdatePetRequest},
    },
    models::{Condition, Favourite, Gender, HealthCondition, Pet, PetType, Reservation, Role, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, favourites, health, pets},
    status::AdoptionStatus,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        pets::list_pets,
        pets::top_pets,
        pets::get_pet,
        favourites::list_favourites,
        favourites::add_favourite,
        favourites::remove_favourite,
        cart::cart_list,
        cart::reserve_pet,
        cart::release_pet,
        admin::create_pet,
        admin::update_pet,
        admin::list_reservations
    ),
    components(
        schemas(
            User,
            Role,
            Pet,
            PetType,
            Gender,
            HealthCondition,
            AdoptionStatus,
            Condition,
            Favourite,
            Reservation,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CatalogQuery,
            PetList,
            PetRef,
            ReservationEntry,
            ReservationList,
            PetInput,
            UpdatePetRequest,
            NumericInput,
            FlagInput,
            health::HealthData,
            Meta,
            ApiResponse<Pet>,
            ApiResponse<PetList>,
            ApiResponse<ReservationList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Pets", description = "Catalog endpoints"),
        (name = "Favourites", description = "Favourite endpoints"),
        (name = "Cart", description = "Reservation endpoints"),
        (name = "Admin", description = "Admin endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
