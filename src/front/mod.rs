pub mod auth;
pub mod care;
pub mod dashboard;
pub mod errors;
pub mod forms;
pub mod middleware;
pub mod pet;
pub mod routes;

use crate::{repo, services};

pub struct AppState {
    pub repo: repo::ImplAppRepo,
    pub storage_service: services::ImplStorageService,
    pub push_service: services::ImplPushService,
}
