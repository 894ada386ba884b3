pub mod audit_logs;
pub mod favourites;
pub mod pet_conditions;
pub mod pets;
pub mod reservations;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use favourites::Entity as Favourites;
pub use pet_conditions::Entity as PetConditions;
pub use pets::Entity as Pets;
pub use reservations::Entity as Reservations;
pub use users::Entity as Users;
