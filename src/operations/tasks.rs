use std::collections::HashMap;

use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder};

use crate::core::Resource;
use crate::entities::{TaskStatus, employee, project, task};
use crate::errors::ApiError;
use crate::filtering::{SortOrder, TaskSortKey, apply_task_filters, compare_tasks, next_sort_tokens};
use crate::models::{TaskEditForm, TaskForm, TaskQueries};
use crate::operations::{employees, projects};
use crate::validation::{ValidationError, ValidationErrors, validators};
use crate::views::{Choice, TaskEditPage, TaskFormPage, TaskIndexPage, TaskRow};

pub const AUTHOR_NOT_MEMBER: &str = "This author doesn't work on the selected project";
pub const EXECUTOR_NOT_MEMBER: &str = "This executor doesn't work on the selected project";

/// Id lookups used to resolve the references of task rows.
struct Lookups {
    projects: HashMap<i32, project::Model>,
    employees: HashMap<i32, employee::Model>,
}

impl Lookups {
    async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, ApiError> {
        let projects = project::Entity::find().all(db).await?;
        let employees = employees::list(db).await?;
        Ok(Self {
            projects: projects.into_iter().map(|p| (p.id, p)).collect(),
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
        })
    }

    fn employee(&self, id: i32) -> Result<&employee::Model, ApiError> {
        self.employees.get(&id).ok_or_else(|| dangling("employee", id))
    }

    fn row(&self, task: task::Model) -> Result<TaskRow, ApiError> {
        let project = self
            .projects
            .get(&task.project_id)
            .ok_or_else(|| dangling("project", task.project_id))?;
        let author = self.employee(task.author_id)?;
        let executor = self.employee(task.executor_id)?;

        Ok(TaskRow {
            project_name: project.name.clone(),
            author_first_name: author.first_name.clone(),
            author_last_name: author.last_name.clone(),
            executor_first_name: executor.first_name.clone(),
            executor_last_name: executor.last_name.clone(),
            status_label: task.status.label(),
            task,
        })
    }
}

fn dangling(kind: &str, id: i32) -> ApiError {
    ApiError::internal(
        "Failed to resolve task references",
        Some(format!("task references missing {kind} {id}")),
    )
}

/// Filtered and sorted task rows with the choice lists for the filter form.
///
/// # Errors
///
/// Returns `ApiError::Database` when a query fails.
pub async fn list<C: ConnectionTrait>(db: &C, query: &TaskQueries) -> Result<TaskIndexPage, ApiError> {
    let mut tasks = task::Entity::find()
        .order_by_asc(task::Column::Id)
        .all(db)
        .await?;
    apply_task_filters(query, &mut tasks);

    let lookups = Lookups::load(db).await?;
    let mut rows = tasks
        .into_iter()
        .map(|task| lookups.row(task))
        .collect::<Result<Vec<_>, _>>()?;

    let token = query.sort_order.as_deref();
    SortOrder::<TaskSortKey>::parse(token).sort(&mut rows, compare_tasks);

    let mut projects: Vec<project::Model> = lookups.projects.into_values().collect();
    projects.sort_by_key(|p| p.id);
    let mut employees: Vec<employee::Model> = lookups.employees.into_values().collect();
    employees.sort_by_key(|e| e.id);

    Ok(TaskIndexPage {
        tasks: rows,
        sort_order: token.unwrap_or_default().to_string(),
        sort_links: next_sort_tokens::<TaskSortKey>(token),
        projects: Choice::from_projects(&projects),
        employees: Choice::from_employees(&employees),
        statuses: Choice::statuses(),
    })
}

/// # Errors
///
/// Returns `ApiError::NotFound` when no task has this id.
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<task::Model, ApiError> {
    task::Entity::get_one(db, id).await
}

/// One task with its project, author, executor and status label resolved.
///
/// # Errors
///
/// Returns `ApiError::NotFound` when no task has this id.
pub async fn details<C: ConnectionTrait>(db: &C, id: i32) -> Result<TaskRow, ApiError> {
    let task = task::Entity::get_one(db, id).await?;
    let project = project::Entity::get_one(db, task.project_id).await?;
    let author = employee::Entity::get_one(db, task.author_id).await?;
    let executor = if task.executor_id == task.author_id {
        author.clone()
    } else {
        employee::Entity::get_one(db, task.executor_id).await?
    };

    Ok(TaskRow {
        project_name: project.name,
        author_first_name: author.first_name,
        author_last_name: author.last_name,
        executor_first_name: executor.first_name,
        executor_last_name: executor.last_name,
        status_label: task.status.label(),
        task,
    })
}

/// Create form offering every project and employee.
///
/// # Errors
///
/// Returns `ApiError::Database` when a query fails.
pub async fn form_page<C: ConnectionTrait>(
    db: &C,
    form: Option<TaskForm>,
    errors: Vec<ValidationError>,
) -> Result<TaskFormPage, ApiError> {
    Ok(TaskFormPage {
        form,
        errors,
        projects: project::Entity::find()
            .order_by_asc(project::Column::Id)
            .all(db)
            .await?,
        employees: employees::list(db).await?,
        statuses: Choice::statuses(),
    })
}

/// Edit form for a stored task. Only members of its project are offered as
/// executors. Without `form` the stored values are prefilled.
///
/// # Errors
///
/// Returns `ApiError::NotFound` when no task has this id.
pub async fn edit_page<C: ConnectionTrait>(
    db: &C,
    id: i32,
    form: Option<TaskEditForm>,
    errors: Vec<ValidationError>,
) -> Result<TaskEditPage, ApiError> {
    let task = task::Entity::get_one(db, id).await?;
    let employees = projects::members(db, task.project_id).await?;
    let form = form.unwrap_or_else(|| TaskEditForm::from(&task));

    Ok(TaskEditPage {
        task,
        form: Some(form),
        errors,
        employees,
        statuses: Choice::statuses(),
    })
}

fn parse_status(raw: i32) -> Result<TaskStatus, ApiError> {
    TaskStatus::try_from(raw).map_err(ApiError::bad_request)
}

fn validate_text(name: &str, description: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.check(validators::validate_required("name", name));
    errors.check(validators::validate_required("description", description));
    errors
}

/// Validate and insert, returning the new id.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for an undefined status or an unknown
/// project, and `ApiError::Validation` for blank text or an author or
/// executor who is not on the project.
pub async fn create<C: ConnectionTrait>(db: &C, form: &TaskForm) -> Result<i32, ApiError> {
    let status = parse_status(form.status)?;
    if !project::Entity::exists(db, form.project_id).await? {
        return Err(ApiError::bad_request(format!(
            "Project {} does not exist",
            form.project_id
        )));
    }

    let staff = projects::member_ids(db, form.project_id).await?;
    let mut errors = validate_text(&form.name, &form.description);
    if !staff.contains(&form.author_id) {
        errors.add(ValidationError::new("authorId", AUTHOR_NOT_MEMBER));
    }
    if !staff.contains(&form.executor_id) {
        errors.add(ValidationError::new("executorId", EXECUTOR_NOT_MEMBER));
    }
    errors.result()?;

    let id = task::Entity::insert(task::ActiveModel {
        name: Set(form.name.clone()),
        description: Set(form.description.clone()),
        project_id: Set(form.project_id),
        author_id: Set(form.author_id),
        executor_id: Set(form.executor_id),
        status: Set(status),
        priority: Set(form.priority),
        ..Default::default()
    })
    .exec(db)
    .await?
    .last_insert_id;

    tracing::info!(task_id = id, project_id = form.project_id, "Task created");
    Ok(id)
}

/// Replace the editable fields. Project and author never change; a new
/// executor must already be on the task's project.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for an undefined status or an executor
/// outside the project, `ApiError::NotFound` for an unknown id,
/// `ApiError::Validation` for blank text and `ApiError::Conflict` if the row
/// changed meanwhile.
pub async fn update<C: ConnectionTrait>(db: &C, id: i32, form: &TaskEditForm) -> Result<(), ApiError> {
    let status = parse_status(form.status)?;
    let current = task::Entity::get_one(db, id).await?;

    if current.executor_id != form.executor_id
        && !projects::is_member(db, current.project_id, form.executor_id).await?
    {
        return Err(ApiError::bad_request(format!(
            "Employee {} doesn't work on project {}",
            form.executor_id, current.project_id
        )));
    }
    validate_text(&form.name, &form.description).result()?;

    let changes = task::ActiveModel {
        name: Set(form.name.clone()),
        description: Set(form.description.clone()),
        executor_id: Set(form.executor_id),
        status: Set(status),
        priority: Set(form.priority),
        ..Default::default()
    };
    task::Entity::update_versioned(db, id, current.row_version, changes).await?;

    tracing::info!(task_id = id, "Task updated");
    Ok(())
}

/// # Errors
///
/// Returns `ApiError::Database` when the delete fails.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    task::Entity::delete_one(db, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_status_is_bad_request() {
        assert_eq!(parse_status(2).ok(), Some(TaskStatus::Done));
        let err = parse_status(5).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_task_text_is_required() {
        let errors = validate_text("", "Write docs");
        assert!(errors.has_field("name"));
        assert!(!errors.has_field("description"));
        assert!(validate_text("Docs", "Write docs").is_empty());
    }
}
