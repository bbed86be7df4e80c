//! OpenAPI document and the interactive reference served next to the API.

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa_scalar::{Scalar, Servable};

use crate::validation::ValidationError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "taskboard",
        description = "Employees, projects and the tasks assigned within them"
    ),
    tags(
        (name = "Employees", description = "Staff records"),
        (name = "Projects", description = "Projects and their membership"),
        (name = "Tasks", description = "Tasks within projects")
    ),
    components(schemas(ValidationError))
)]
pub struct ApiDoc;

/// `/openapi.json` and the Scalar UI at `/docs`.
pub fn docs_router(api: OpenApiDocument) -> Router {
    let document = api.clone();
    Router::new()
        .route(
            "/openapi.json",
            get(move || {
                let document = document.clone();
                async move { Json(document) }
            }),
        )
        .merge(Scalar::with_url("/docs", api))
}
