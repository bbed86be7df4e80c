//! # taskboard
//!
//! Record keeping for employees, the projects they staff and the tasks
//! assigned within those projects, served over Axum with Sea-ORM storage.
//!
//! ```rust,ignore
//! let db = Database::connect("sqlite::memory:").await?;
//! Migrator::up(&db, None).await?;
//! let app = taskboard::app(&db);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod errors;
pub mod filtering;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod operations;
pub mod routes;
pub mod validation;
pub mod views;

use axum::Router;
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

pub use config::AppConfig;
pub use crate::core::Resource;
pub use errors::ApiError;
pub use migration::Migrator;
pub use validation::{ValidationError, ValidationErrors};

/// Every endpoint plus `/openapi.json` and `/docs`.
pub fn app(db: &DatabaseConnection) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(openapi::ApiDoc::openapi())
        .merge(routes::employees::router(db))
        .merge(routes::projects::router(db))
        .merge(routes::tasks::router(db))
        .split_for_parts();

    router.merge(openapi::docs_router(api))
}
