use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pet_conditions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pet_id: Uuid,
    pub weight: Option<f64>,
    pub vaccination_date: Option<DateTimeWithTimeZone>,
    pub health_condition: Option<String>,
    pub sterilisation_status: bool,
    pub adoption_fee: f64,
    pub previous_owner: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pets::Entity",
        from = "Column::PetId",
        to = "super::pets::Column::Id"
    )]
    Pets,
}

impl Related<super::pets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
