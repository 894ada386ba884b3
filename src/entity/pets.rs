use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub pet_type: String,
    pub breed: String,
    pub gender: String,
    pub age_month: i32,
    pub description: String,
    pub image: String,
    pub adoption_status: String,
    pub name_key: String,
    pub pet_type_key: String,
    pub breed_key: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::pet_conditions::Entity")]
    PetConditions,
    #[sea_orm(has_many = "super::favourites::Entity")]
    Favourites,
    #[sea_orm(has_one = "super::reservations::Entity")]
    Reservations,
}

impl Related<super::pet_conditions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PetConditions.def()
    }
}

impl Related<super::favourites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favourites.def()
    }
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
