use std::collections::HashSet;

use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::core::Resource;
use crate::entities::{employee, project, project_employee};
use crate::errors::ApiError;
use crate::filtering::{
    ProjectSortKey, SortOrder, apply_project_filters, compare_projects, next_sort_tokens,
};
use crate::models::{ProjectForm, ProjectQueries};
use crate::operations::employees;
use crate::validation::{ValidationError, ValidationErrors, validators};
use crate::views::{ProjectDetailsPage, ProjectFormPage, ProjectIndexPage};

pub const LEADER_NOT_FOUND: &str = "Selected leader does not exist";

/// Filtered and sorted project list with the header toggle tokens.
///
/// # Errors
///
/// Returns `ApiError::Database` when the query fails.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    query: &ProjectQueries,
) -> Result<ProjectIndexPage, ApiError> {
    let mut projects = project::Entity::find()
        .order_by_asc(project::Column::Id)
        .all(db)
        .await?;

    apply_project_filters(query, &mut projects);
    let token = query.sort_order.as_deref();
    SortOrder::<ProjectSortKey>::parse(token).sort(&mut projects, compare_projects);

    Ok(ProjectIndexPage {
        projects,
        sort_order: token.unwrap_or_default().to_string(),
        sort_links: next_sort_tokens::<ProjectSortKey>(token),
    })
}

/// # Errors
///
/// Returns `ApiError::NotFound` when no project has this id.
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<project::Model, ApiError> {
    project::Entity::get_one(db, id).await
}

/// Ids of the employees staffed on a project.
///
/// # Errors
///
/// Propagates query failures.
pub async fn member_ids<C: ConnectionTrait>(db: &C, project_id: i32) -> Result<HashSet<i32>, DbErr> {
    let ids: Vec<i32> = project_employee::Entity::find()
        .select_only()
        .column(project_employee::Column::EmployeeId)
        .filter(project_employee::Column::ProjectId.eq(project_id))
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids.into_iter().collect())
}

/// # Errors
///
/// Propagates query failures.
pub async fn is_member<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    employee_id: i32,
) -> Result<bool, DbErr> {
    Ok(project_employee::Entity::find_by_id((project_id, employee_id))
        .one(db)
        .await?
        .is_some())
}

/// Members of a project in id order.
///
/// # Errors
///
/// Propagates query failures.
pub async fn members<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
) -> Result<Vec<employee::Model>, DbErr> {
    employee::Entity::find()
        .inner_join(project_employee::Entity)
        .filter(project_employee::Column::ProjectId.eq(project_id))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
}

/// The project, its members and the employees that could still be added.
///
/// # Errors
///
/// Returns `ApiError::NotFound` when no project has this id.
pub async fn details<C: ConnectionTrait>(db: &C, id: i32) -> Result<ProjectDetailsPage, ApiError> {
    let project = project::Entity::get_one(db, id).await?;
    let members = members(db, id).await?;

    let staffed: HashSet<i32> = members.iter().map(|member| member.id).collect();
    let available = employees::list(db)
        .await?
        .into_iter()
        .filter(|employee| !staffed.contains(&employee.id))
        .collect();

    Ok(ProjectDetailsPage {
        project,
        members,
        available,
    })
}

/// Create/edit form with every employee offered as a leader.
///
/// # Errors
///
/// Returns `ApiError::Database` when the employee query fails.
pub async fn form_page<C: ConnectionTrait>(
    db: &C,
    id: Option<i32>,
    form: Option<ProjectForm>,
    errors: Vec<ValidationError>,
) -> Result<ProjectFormPage, ApiError> {
    Ok(ProjectFormPage {
        id,
        form,
        errors,
        employees: employees::list(db).await?,
    })
}

/// Edit form prefilled with the stored project.
///
/// # Errors
///
/// Returns `ApiError::NotFound` when no project has this id.
pub async fn edit_page<C: ConnectionTrait>(db: &C, id: i32) -> Result<ProjectFormPage, ApiError> {
    let project = project::Entity::get_one(db, id).await?;
    form_page(db, Some(id), Some(ProjectForm::from(&project)), Vec::new()).await
}

/// Checks that need no database access.
#[must_use]
pub fn validate_project(form: &ProjectForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.check(validators::validate_required("name", &form.name));
    errors.check(validators::validate_required(
        "customerCompany",
        &form.customer_company,
    ));
    errors.check(validators::validate_required(
        "executorCompany",
        &form.executor_company,
    ));
    errors.check(validators::validate_date_range(
        "endDate",
        form.start_date,
        form.end_date,
    ));
    errors
}

fn changes(form: &ProjectForm) -> project::ActiveModel {
    project::ActiveModel {
        name: Set(form.name.clone()),
        customer_company: Set(form.customer_company.clone()),
        executor_company: Set(form.executor_company.clone()),
        start_date: Set(form.start_date),
        end_date: Set(form.end_date),
        priority: Set(form.priority),
        leader_id: Set(form.leader_id),
        ..Default::default()
    }
}

async fn add_membership<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    employee_id: i32,
) -> Result<(), DbErr> {
    if is_member(db, project_id, employee_id).await? {
        return Ok(());
    }
    project_employee::Entity::insert(project_employee::ActiveModel {
        project_id: Set(project_id),
        employee_id: Set(employee_id),
    })
    .exec_without_returning(db)
    .await?;
    Ok(())
}

async fn remove_membership<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    employee_id: i32,
) -> Result<(), DbErr> {
    project_employee::Entity::delete_by_id((project_id, employee_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Validate and insert the project together with its leader's membership.
///
/// # Errors
///
/// Returns `ApiError::Validation` for blank text, an inverted date range or
/// an unknown leader.
pub async fn create<C>(db: &C, form: &ProjectForm) -> Result<i32, ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut errors = validate_project(form);
    if !employee::Entity::exists(db, form.leader_id).await? {
        errors.add(ValidationError::new("leaderId", LEADER_NOT_FOUND));
    }
    errors.result()?;

    let txn = db.begin().await?;
    let id = project::Entity::insert(changes(form))
        .exec(&txn)
        .await?
        .last_insert_id;
    add_membership(&txn, id, form.leader_id).await?;
    txn.commit().await?;

    tracing::info!(project_id = id, leader_id = form.leader_id, "Project created");
    Ok(id)
}

/// Replace the project's fields. A new leader takes the old leader's place in
/// the member set.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown id, `ApiError::Validation` for
/// invalid fields and `ApiError::Conflict` if the row changed meanwhile.
pub async fn update<C>(db: &C, id: i32, form: &ProjectForm) -> Result<(), ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let current = project::Entity::get_one(db, id).await?;
    let leader_changed = current.leader_id != form.leader_id;

    let mut errors = validate_project(form);
    if leader_changed && !employee::Entity::exists(db, form.leader_id).await? {
        errors.add(ValidationError::new("leaderId", LEADER_NOT_FOUND));
    }
    errors.result()?;

    let txn = db.begin().await?;
    project::Entity::update_versioned(&txn, id, current.row_version, changes(form)).await?;
    if leader_changed {
        remove_membership(&txn, id, current.leader_id).await?;
        add_membership(&txn, id, form.leader_id).await?;
    }
    txn.commit().await?;

    tracing::info!(project_id = id, leader_changed, "Project updated");
    Ok(())
}

/// Add the listed employees to the project. Unknown ids are skipped and
/// existing members stay as they are.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown project and
/// `ApiError::BadRequest` when no id list was sent.
pub async fn add_employees<C>(
    db: &C,
    project_id: i32,
    employee_ids: Option<&[i32]>,
) -> Result<(), ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    project::Entity::get_one(db, project_id).await?;
    let Some(employee_ids) = employee_ids else {
        return Err(ApiError::bad_request("employeeIds is required"));
    };
    if employee_ids.is_empty() {
        return Ok(());
    }

    let txn = db.begin().await?;
    let current = member_ids(&txn, project_id).await?;
    let added: Vec<i32> = employee::Entity::find()
        .filter(employee::Column::Id.is_in(employee_ids.iter().copied()))
        .order_by_asc(employee::Column::Id)
        .all(&txn)
        .await?
        .into_iter()
        .map(|employee| employee.id)
        .filter(|id| !current.contains(id))
        .collect();

    if !added.is_empty() {
        project_employee::Entity::insert_many(added.iter().map(|&employee_id| {
            project_employee::ActiveModel {
                project_id: Set(project_id),
                employee_id: Set(employee_id),
            }
        }))
        .exec_without_returning(&txn)
        .await?;
    }
    txn.commit().await?;

    tracing::info!(project_id, added = added.len(), "Employees added to project");
    Ok(())
}

/// Take an employee off the project. The leader cannot be removed this way
/// and the request is ignored.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown project.
pub async fn delete_employee<C>(db: &C, project_id: i32, employee_id: i32) -> Result<(), ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let project = project::Entity::get_one(&txn, project_id).await?;
    if project.leader_id == employee_id {
        tracing::debug!(project_id, employee_id, "Leader kept on project");
        return Ok(());
    }
    remove_membership(&txn, project_id, employee_id).await?;
    txn.commit().await?;

    tracing::info!(project_id, employee_id, "Employee removed from project");
    Ok(())
}

/// Remove the project with its memberships and tasks. A missing id is a no-op.
///
/// # Errors
///
/// Returns `ApiError::Database` when the delete fails.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    project::Entity::delete_one(db, id).await
}
