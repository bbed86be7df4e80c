//! `/Employees` handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

use super::{redisplay, see_other};
use crate::entities::employee;
use crate::errors::ApiError;
use crate::models::EmployeeForm;
use crate::operations::employees;
use crate::views::EmployeeFormPage;

const INDEX: &str = "/Employees";

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
    path = "/Employees",
    tag = "Employees",
    responses((status = 200, description = "All employees in id order", body = [employee::Model]))
)]
pub async fn index(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<employee::Model>>, ApiError> {
    Ok(Json(employees::list(&db).await?))
}

#[utoipa::path(
    get,
    path = "/Employees/Details/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "The employee", body = employee::Model),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn details(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<employee::Model>, ApiError> {
    Ok(Json(employees::get(&db, id).await?))
}

#[utoipa::path(
    get,
    path = "/Employees/Create",
    tag = "Employees",
    responses((status = 200, description = "Blank form", body = EmployeeFormPage))
)]
pub async fn create_form() -> Json<EmployeeFormPage> {
    Json(EmployeeFormPage {
        id: None,
        form: EmployeeForm::default(),
        errors: Vec::new(),
    })
}

#[utoipa::path(
    post,
    path = "/Employees/Create",
    tag = "Employees",
    request_body = EmployeeForm,
    responses(
        (status = 303, description = "Created, redirect to the list"),
        (status = 200, description = "Form with field errors", body = EmployeeFormPage)
    )
)]
pub async fn create(
    State(db): State<DatabaseConnection>,
    Json(form): Json<EmployeeForm>,
) -> Result<Response, ApiError> {
    match redisplay(employees::create(&db, &form).await)? {
        Ok(_) => Ok(see_other(INDEX)),
        Err(errors) => Ok(Json(EmployeeFormPage {
            id: None,
            form,
            errors,
        })
        .into_response()),
    }
}

#[utoipa::path(
    get,
    path = "/Employees/Edit/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Form prefilled with the employee", body = EmployeeFormPage),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn edit_form(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeFormPage>, ApiError> {
    let employee = employees::get(&db, id).await?;
    Ok(Json(EmployeeFormPage {
        id: Some(id),
        form: EmployeeForm::from(&employee),
        errors: Vec::new(),
    }))
}

#[utoipa::path(
    post,
    path = "/Employees/Edit/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = EmployeeForm,
    responses(
        (status = 303, description = "Updated, redirect to the list"),
        (status = 200, description = "Form with field errors", body = EmployeeFormPage),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee changed concurrently")
    )
)]
pub async fn edit(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(form): Json<EmployeeForm>,
) -> Result<Response, ApiError> {
    match redisplay(employees::update(&db, id, &form).await)? {
        Ok(()) => Ok(see_other(INDEX)),
        Err(errors) => Ok(Json(EmployeeFormPage {
            id: Some(id),
            form,
            errors,
        })
        .into_response()),
    }
}

#[utoipa::path(
    get,
    path = "/Employees/Delete/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee to confirm", body = employee::Model),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_form(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<employee::Model>, ApiError> {
    Ok(Json(employees::get(&db, id).await?))
}

#[utoipa::path(
    post,
    path = "/Employees/Delete/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses((status = 303, description = "Deleted or already absent, redirect to the list"))
)]
pub async fn delete(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    employees::delete(&db, id).await?;
    Ok(see_other(INDEX))
}
