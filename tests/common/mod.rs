#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use taskboard::Migrator;
use taskboard::entities::TaskStatus;
use taskboard::models::{EmployeeForm, ProjectForm, TaskForm};
use taskboard::operations::{employees, projects, tasks};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_test_app(db: &DatabaseConnection) -> Router {
    taskboard::app(db)
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn employee_form(first: &str, last: &str, email: &str) -> EmployeeForm {
    EmployeeForm {
        first_name: first.to_string(),
        last_name: last.to_string(),
        middle_name: None,
        email: email.to_string(),
    }
}

pub fn project_form(name: &str, leader_id: i32, start: NaiveDate, end: NaiveDate) -> ProjectForm {
    ProjectForm {
        name: name.to_string(),
        customer_company: "Acme".to_string(),
        executor_company: "Initech".to_string(),
        start_date: start,
        end_date: end,
        priority: 1,
        leader_id,
    }
}

pub fn task_form(
    name: &str,
    project_id: i32,
    author_id: i32,
    executor_id: i32,
    status: TaskStatus,
    priority: i32,
) -> TaskForm {
    TaskForm {
        name: name.to_string(),
        description: format!("{name} description"),
        project_id,
        author_id,
        executor_id,
        status: status.as_i32(),
        priority,
    }
}

pub async fn seed_employee(db: &DatabaseConnection, first: &str, last: &str, email: &str) -> i32 {
    employees::create(db, &employee_form(first, last, email))
        .await
        .expect("Failed to seed employee")
}

pub async fn seed_project(db: &DatabaseConnection, name: &str, leader_id: i32) -> i32 {
    projects::create(db, &project_form(name, leader_id, date(1, 1), date(6, 1)))
        .await
        .expect("Failed to seed project")
}

pub async fn seed_task(db: &DatabaseConnection, form: &TaskForm) -> i32 {
    tasks::create(db, form).await.expect("Failed to seed task")
}

/// Sends a request through the router and returns the response.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
