use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, auth: AuthConfig) -> Self {
        Self { orm, auth }
    }
}
