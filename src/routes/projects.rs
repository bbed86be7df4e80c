//! `/Projects` handlers, including membership changes.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

use super::{redisplay, see_other};
use crate::entities::project;
use crate::errors::ApiError;
use crate::models::{AddEmployeesForm, DeleteEmployeeForm, ProjectForm, ProjectQueries};
use crate::operations::projects;
use crate::views::{ProjectDetailsPage, ProjectFormPage, ProjectIndexPage};

const INDEX: &str = "/Projects";

fn details_location(id: i32) -> String {
    format!("/Projects/Details/{id}")
}

pub fn router(db: &DatabaseConnection) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(index))
        .routes(routes!(details))
        .routes(routes!(create_form, create))
        .routes(routes!(add_employees))
        .routes(routes!(delete_employee))
        .routes(routes!(edit_form, edit))
        .routes(routes!(delete_form, delete))
        .with_state(db.clone())
}

#[utoipa::path(
    get,
    path = "/Projects",
    tag = "Projects",
    params(
        ("sortOrder" = Option<String>, Query, description = "Sort token such as `priority` or `priorityDesc`"),
        ("startDate" = Option<chrono::NaiveDate>, Query, description = "Projects starting on or after this date"),
        ("endDate" = Option<chrono::NaiveDate>, Query, description = "Projects ending on or before this date"),
        ("priority" = Option<i32>, Query, description = "Exact priority")
    ),
    responses((status = 200, description = "Filtered and sorted projects", body = ProjectIndexPage))
)]
pub async fn index(
    State(db): State<DatabaseConnection>,
    Query(query): Query<ProjectQueries>,
) -> Result<Json<ProjectIndexPage>, ApiError> {
    Ok(Json(projects::list(&db, &query).await?))
}

#[utoipa::path(
    get,
    path = "/Projects/Details/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project with members and candidates", body = ProjectDetailsPage),
        (status = 404, description = "Project not found")
    )
)]
pub async fn details(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectDetailsPage>, ApiError> {
    Ok(Json(projects::details(&db, id).await?))
}

#[utoipa::path(
    get,
    path = "/Projects/Create",
    tag = "Projects",
    responses((status = 200, description = "Blank form with leader candidates", body = ProjectFormPage))
)]
pub async fn create_form(
    State(db): State<DatabaseConnection>,
) -> Result<Json<ProjectFormPage>, ApiError> {
    Ok(Json(projects::form_page(&db, None, None, Vec::new()).await?))
}

#[utoipa::path(
    post,
    path = "/Projects/Create",
    tag = "Projects",
    request_body = ProjectForm,
    responses(
        (status = 303, description = "Created, redirect to the list"),
        (status = 200, description = "Form with field errors", body = ProjectFormPage)
    )
)]
pub async fn create(
    State(db): State<DatabaseConnection>,
    Json(form): Json<ProjectForm>,
) -> Result<Response, ApiError> {
    match redisplay(projects::create(&db, &form).await)? {
        Ok(_) => Ok(see_other(INDEX)),
        Err(errors) => {
            let page = projects::form_page(&db, None, Some(form), errors).await?;
            Ok(Json(page).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/Projects/AddEmployees",
    tag = "Projects",
    request_body = AddEmployeesForm,
    responses(
        (status = 303, description = "Members added, redirect to the project details"),
        (status = 400, description = "No employee id list"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn add_employees(
    State(db): State<DatabaseConnection>,
    Json(form): Json<AddEmployeesForm>,
) -> Result<Response, ApiError> {
    projects::add_employees(&db, form.project_id, form.employee_ids.as_deref()).await?;
    Ok(see_other(&details_location(form.project_id)))
}

#[utoipa::path(
    post,
    path = "/Projects/DeleteEmployee",
    tag = "Projects",
    request_body = DeleteEmployeeForm,
    responses(
        (status = 303, description = "Member removed (the leader is kept), redirect to the project details"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_employee(
    State(db): State<DatabaseConnection>,
    Json(form): Json<DeleteEmployeeForm>,
) -> Result<Response, ApiError> {
    projects::delete_employee(&db, form.project_id, form.employee_id).await?;
    Ok(see_other(&details_location(form.project_id)))
}

#[utoipa::path(
    get,
    path = "/Projects/Edit/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Form prefilled with the project", body = ProjectFormPage),
        (status = 404, description = "Project not found")
    )
)]
pub async fn edit_form(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectFormPage>, ApiError> {
    Ok(Json(projects::edit_page(&db, id).await?))
}

#[utoipa::path(
    post,
    path = "/Projects/Edit/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project id")),
    request_body = ProjectForm,
    responses(
        (status = 303, description = "Updated, redirect to the list"),
        (status = 200, description = "Form with field errors", body = ProjectFormPage),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Project changed concurrently")
    )
)]
pub async fn edit(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(form): Json<ProjectForm>,
) -> Result<Response, ApiError> {
    match redisplay(projects::update(&db, id, &form).await)? {
        Ok(()) => Ok(see_other(INDEX)),
        Err(errors) => {
            let page = projects::form_page(&db, Some(id), Some(form), errors).await?;
            Ok(Json(page).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/Projects/Delete/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project to confirm", body = project::Model),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_form(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<project::Model>, ApiError> {
    Ok(Json(projects::get(&db, id).await?))
}

#[utoipa::path(
    post,
    path = "/Projects/Delete/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project id")),
    responses((status = 303, description = "Deleted or already absent, redirect to the list"))
)]
pub async fn delete(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    projects::delete(&db, id).await?;
    Ok(see_other(INDEX))
}
