use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use crate::core::Resource;
use crate::entities::employee;
use crate::errors::ApiError;
use crate::models::EmployeeForm;
use crate::validation::{ValidationError, ValidationErrors, validators};

pub const EMAIL_IN_USE: &str = "Email is already in use";

/// All employees in id order.
///
/// # Errors
///
/// Returns `ApiError::Database` when the query fails.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<employee::Model>, ApiError> {
    Ok(employee::Entity::find()
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?)
}

/// # Errors
///
/// Returns `ApiError::NotFound` when no employee has this id.
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<employee::Model, ApiError> {
    employee::Entity::get_one(db, id).await
}

/// True if any employee other than `except` already has `email`.
///
/// # Errors
///
/// Propagates query failures.
pub async fn is_email_used<C: ConnectionTrait>(
    db: &C,
    email: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = employee::Entity::find().filter(employee::Column::Email.eq(email));
    if let Some(id) = except {
        query = query.filter(employee::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

/// Pattern checks for every field of the form, one error per failing field.
#[must_use]
pub fn validate_employee(form: &EmployeeForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.check(validators::validate_name("firstName", &form.first_name));
    errors.check(validators::validate_name("lastName", &form.last_name));
    errors.check(validators::validate_optional_name(
        "middleName",
        form.middle_name.as_deref(),
    ));
    errors.check(validators::validate_email("email", &form.email));
    errors
}

/// Pattern checks plus email uniqueness. `except` exempts the employee being
/// edited so it can keep its own address.
async fn check_form<C: ConnectionTrait>(
    db: &C,
    form: &EmployeeForm,
    except: Option<i32>,
) -> Result<(), ApiError> {
    let mut errors = validate_employee(form);
    if !errors.has_field("email") && is_email_used(db, &form.email, except).await? {
        errors.add(ValidationError::new("email", EMAIL_IN_USE));
    }
    errors.result()?;
    Ok(())
}

/// A concurrent insert can slip past the uniqueness pre-check; the unique
/// index then rejects it and the caller sees the same field error.
fn map_unique_email(err: DbErr) -> ApiError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        ApiError::invalid_field("email", EMAIL_IN_USE)
    } else {
        err.into()
    }
}

fn normalized_middle_name(form: &EmployeeForm) -> Option<String> {
    form.middle_name.clone().filter(|name| !name.is_empty())
}

/// Validate and insert, returning the new id.
///
/// # Errors
///
/// Returns `ApiError::Validation` for pattern failures or a used email.
pub async fn create<C: ConnectionTrait>(db: &C, form: &EmployeeForm) -> Result<i32, ApiError> {
    check_form(db, form, None).await?;

    let model = employee::ActiveModel {
        first_name: Set(form.first_name.clone()),
        last_name: Set(form.last_name.clone()),
        middle_name: Set(normalized_middle_name(form)),
        email: Set(form.email.clone()),
        ..Default::default()
    };
    let id = employee::Entity::insert(model)
        .exec(db)
        .await
        .map_err(map_unique_email)?
        .last_insert_id;

    tracing::info!(employee_id = id, "Employee created");
    Ok(id)
}

/// Replace every field of an existing employee.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown id, `ApiError::Validation`
/// for invalid fields and `ApiError::Conflict` if the row changed meanwhile.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    form: &EmployeeForm,
) -> Result<(), ApiError> {
    let current = employee::Entity::get_one(db, id).await?;
    check_form(db, form, Some(id)).await?;

    let changes = employee::ActiveModel {
        first_name: Set(form.first_name.clone()),
        last_name: Set(form.last_name.clone()),
        middle_name: Set(normalized_middle_name(form)),
        email: Set(form.email.clone()),
        ..Default::default()
    };
    employee::Entity::update_versioned(db, id, current.row_version, changes)
        .await
        .map_err(|err| match err {
            ApiError::Database { internal, .. } => map_unique_email(internal),
            other => other,
        })?;

    tracing::info!(employee_id = id, "Employee updated");
    Ok(())
}

/// Remove the employee with its memberships and the tasks it authored or
/// executes. A missing id is a no-op.
///
/// # Errors
///
/// Returns `ApiError::Database` when the delete fails.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    employee::Entity::delete_one(db, id).await
}
