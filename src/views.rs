//! JSON page documents returned by the GET endpoints and by form submissions
//! that failed validation.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{TaskStatus, employee, project, task};
use crate::models::{EmployeeForm, ProjectForm, TaskEditForm, TaskForm};
use crate::validation::ValidationError;

/// Toggle token for one sortable column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortLink {
    pub column: &'static str,
    /// Value to send as `sortOrder` when the column header is clicked
    pub sort_order: String,
}

/// `value`/`text` pair for select inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Choice {
    pub value: i32,
    pub text: String,
}

impl Choice {
    #[must_use]
    pub fn statuses() -> Vec<Self> {
        TaskStatus::ALL
            .iter()
            .map(|status| Self {
                value: status.as_i32(),
                text: status.label().to_string(),
            })
            .collect()
    }

    #[must_use]
    pub fn from_projects(projects: &[project::Model]) -> Vec<Self> {
        projects
            .iter()
            .map(|p| Self {
                value: p.id,
                text: p.name.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn from_employees(employees: &[employee::Model]) -> Vec<Self> {
        employees
            .iter()
            .map(|e| Self {
                value: e.id,
                text: e.full_name(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFormPage {
    /// Set on the edit page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub form: EmployeeForm,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIndexPage {
    pub projects: Vec<project::Model>,
    pub sort_order: String,
    pub sort_links: Vec<SortLink>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailsPage {
    pub project: project::Model,
    pub members: Vec<employee::Model>,
    /// Employees not yet on the project
    pub available: Vec<employee::Model>,
}

/// Create/edit form for a project. `form` is absent on the blank create page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFormPage {
    /// Set on the edit page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub form: Option<ProjectForm>,
    pub errors: Vec<ValidationError>,
    pub employees: Vec<employee::Model>,
}

/// A task with its references resolved for display and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: task::Model,
    pub project_name: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub executor_first_name: String,
    pub executor_last_name: String,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskIndexPage {
    pub tasks: Vec<TaskRow>,
    pub sort_order: String,
    pub sort_links: Vec<SortLink>,
    pub projects: Vec<Choice>,
    pub employees: Vec<Choice>,
    pub statuses: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskFormPage {
    pub form: Option<TaskForm>,
    pub errors: Vec<ValidationError>,
    pub projects: Vec<project::Model>,
    pub employees: Vec<employee::Model>,
    pub statuses: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskEditPage {
    pub task: task::Model,
    pub form: Option<TaskEditForm>,
    pub errors: Vec<ValidationError>,
    /// Members of the task's project, the only valid executors
    pub employees: Vec<employee::Model>,
    pub statuses: Vec<Choice>,
}
