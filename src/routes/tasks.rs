//! `/Tasks` handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

use super::{redisplay, see_other};
use crate::errors::ApiError;
use crate::models::{TaskEditForm, TaskForm, TaskQueries};
use crate::operations::tasks;
use crate::views::{TaskEditPage, TaskFormPage, TaskIndexPage, TaskRow};

const INDEX: &str = "/Tasks";

pub fn router(db: &DatabaseConnection) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(index))
        .routes(routes!(details))
        .routes(routes!(create_form, create))
        .routes(routes!(edit_form, edit))
        .routes(routes!(delete_form, delete))
        .with_state(db.clone())
}

#[utoipa::path(
    get,
    path = "/Tasks",
    tag = "Tasks",
    params(
        ("sortOrder" = Option<String>, Query, description = "Sort token such as `executor` or `statusDesc`"),
        ("status" = Option<String>, Query, description = "`ToDo`, `InProgress`, `Done` or `0`, `1`, `2`"),
        ("priority" = Option<i32>, Query, description = "Exact priority"),
        ("projectId" = Option<i32>, Query, description = "Project id"),
        ("authorId" = Option<i32>, Query, description = "Author id"),
        ("executorId" = Option<i32>, Query, description = "Executor id")
    ),
    responses((status = 200, description = "Filtered and sorted tasks", body = TaskIndexPage))
)]
pub async fn index(
    State(db): State<DatabaseConnection>,
    Query(query): Query<TaskQueries>,
) -> Result<Json<TaskIndexPage>, ApiError> {
    Ok(Json(tasks::list(&db, &query).await?))
}

#[utoipa::path(
    get,
    path = "/Tasks/Details/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task with resolved references", body = TaskRow),
        (status = 404, description = "Task not found")
    )
)]
pub async fn details(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<TaskRow>, ApiError> {
    Ok(Json(tasks::details(&db, id).await?))
}

#[utoipa::path(
    get,
    path = "/Tasks/Create",
    tag = "Tasks",
    responses((status = 200, description = "Blank form with projects, employees and statuses", body = TaskFormPage))
)]
pub async fn create_form(
    State(db): State<DatabaseConnection>,
) -> Result<Json<TaskFormPage>, ApiError> {
    Ok(Json(tasks::form_page(&db, None, Vec::new()).await?))
}

#[utoipa::path(
    post,
    path = "/Tasks/Create",
    tag = "Tasks",
    request_body = TaskForm,
    responses(
        (status = 303, description = "Created, redirect to the list"),
        (status = 200, description = "Form with field errors", body = TaskFormPage),
        (status = 400, description = "Undefined status or unknown project")
    )
)]
pub async fn create(
    State(db): State<DatabaseConnection>,
    Json(form): Json<TaskForm>,
) -> Result<Response, ApiError> {
    match redisplay(tasks::create(&db, &form).await)? {
        Ok(_) => Ok(see_other(INDEX)),
        Err(errors) => {
            let page = tasks::form_page(&db, Some(form), errors).await?;
            Ok(Json(page).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/Tasks/Edit/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Form prefilled with the task", body = TaskEditPage),
        (status = 404, description = "Task not found")
    )
)]
pub async fn edit_form(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<TaskEditPage>, ApiError> {
    Ok(Json(tasks::edit_page(&db, id, None, Vec::new()).await?))
}

#[utoipa::path(
    post,
    path = "/Tasks/Edit/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task id")),
    request_body = TaskEditForm,
    responses(
        (status = 303, description = "Updated, redirect to the list"),
        (status = 200, description = "Form with field errors", body = TaskEditPage),
        (status = 400, description = "Undefined status or executor outside the project"),
        (status = 404, description = "Task not found"),
        (status = 409, description = "Task changed concurrently")
    )
)]
pub async fn edit(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(form): Json<TaskEditForm>,
) -> Result<Response, ApiError> {
    match redisplay(tasks::update(&db, id, &form).await)? {
        Ok(()) => Ok(see_other(INDEX)),
        Err(errors) => {
            let page = tasks::edit_page(&db, id, Some(form), errors).await?;
            Ok(Json(page).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/Tasks/Delete/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task to confirm", body = TaskRow),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_form(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<TaskRow>, ApiError> {
    Ok(Json(tasks::details(&db, id).await?))
}

#[utoipa::path(
    post,
    path = "/Tasks/Delete/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses((status = 303, description = "Deleted or already absent, redirect to the list"))
)]
pub async fn delete(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    tasks::delete(&db, id).await?;
    Ok(see_other(INDEX))
}
