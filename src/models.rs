//! Request shapes: list query parameters and submitted forms.
//!
//! Query parameters treat an empty value (`?priority=`) the same as a missing
//! one. Forms are JSON bodies with camelCase keys; text fields default to an
//! empty string so a missing value surfaces as a "required" field error
//! instead of a rejected body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::ToSchema;

use crate::entities::{TaskStatus, employee, project, task};

/// Filters and sort token for `GET /Projects`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQueries {
    #[serde(default)]
    pub sort_order: Option<String>,
    /// Keep projects starting on or after this date
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub start_date: Option<NaiveDate>,
    /// Keep projects ending on or before this date
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub priority: Option<i32>,
}

/// Filters and sort token for `GET /Tasks`. Every filter is an equality match.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueries {
    #[serde(default)]
    pub sort_order: Option<String>,
    /// `ToDo`/`InProgress`/`Done` or `0`/`1`/`2`
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub priority: Option<i32>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub project_id: Option<i32>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub author_id: Option<i32>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub executor_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub email: String,
}

/// Project create/edit submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub customer_company: String,
    #[serde(default)]
    pub executor_company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priority: i32,
    pub leader_id: i32,
}

/// Task create submission. `status` is the raw number so an undefined value
/// can be rejected as a bad request rather than a body error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub project_id: i32,
    pub author_id: i32,
    pub executor_id: i32,
    pub status: i32,
    pub priority: i32,
}

/// Task edit submission; project and author cannot change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskEditForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub executor_id: i32,
    pub status: i32,
    pub priority: i32,
}

impl From<&employee::Model> for EmployeeForm {
    fn from(model: &employee::Model) -> Self {
        Self {
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            middle_name: model.middle_name.clone(),
            email: model.email.clone(),
        }
    }
}

impl From<&project::Model> for ProjectForm {
    fn from(model: &project::Model) -> Self {
        Self {
            name: model.name.clone(),
            customer_company: model.customer_company.clone(),
            executor_company: model.executor_company.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
            priority: model.priority,
            leader_id: model.leader_id,
        }
    }
}

impl From<&task::Model> for TaskEditForm {
    fn from(model: &task::Model) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
            executor_id: model.executor_id,
            status: model.status.as_i32(),
            priority: model.priority,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeesForm {
    pub project_id: i32,
    /// `null` or missing is rejected; an empty list is a no-op
    #[serde(default)]
    pub employee_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmployeeForm {
    pub project_id: i32,
    pub employee_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_values_are_absent() {
        let q: ProjectQueries =
            serde_json::from_value(serde_json::json!({"priority": "", "startDate": ""})).unwrap();
        assert_eq!(q.priority, None);
        assert_eq!(q.start_date, None);
        assert_eq!(q.sort_order, None);
    }

    #[test]
    fn test_task_queries_parse_status_by_name_or_number() {
        let by_name: TaskQueries =
            serde_json::from_value(serde_json::json!({"status": "Done", "priority": "2"}))
                .unwrap();
        assert_eq!(by_name.status, Some(TaskStatus::Done));
        assert_eq!(by_name.priority, Some(2));

        let by_number: TaskQueries =
            serde_json::from_value(serde_json::json!({"status": "1"})).unwrap();
        assert_eq!(by_number.status, Some(TaskStatus::InProgress));
    }

    #[test]
    fn test_add_employees_distinguishes_null_from_empty() {
        let missing: AddEmployeesForm =
            serde_json::from_value(serde_json::json!({"projectId": 1})).unwrap();
        assert!(missing.employee_ids.is_none());

        let null: AddEmployeesForm =
            serde_json::from_value(serde_json::json!({"projectId": 1, "employeeIds": null}))
                .unwrap();
        assert!(null.employee_ids.is_none());

        let empty: AddEmployeesForm =
            serde_json::from_value(serde_json::json!({"projectId": 1, "employeeIds": []}))
                .unwrap();
        assert_eq!(empty.employee_ids, Some(vec![]));
    }
}
