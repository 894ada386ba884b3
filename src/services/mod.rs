pub mod auth_service;
pub mod catalog_service;
pub mod ledger_service;
pub mod pet_service;
