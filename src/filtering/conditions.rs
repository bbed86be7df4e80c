//! Optional list filters, each applied only when its query value is present.

use crate::entities::{project, task};
use crate::models::{ProjectQueries, TaskQueries};

/// Conjunction of the project filters that are present.
#[must_use]
pub fn project_matches(query: &ProjectQueries, project: &project::Model) -> bool {
    query.priority.is_none_or(|priority| project.priority == priority)
        && query.start_date.is_none_or(|start| project.start_date >= start)
        && query.end_date.is_none_or(|end| project.end_date <= end)
}

/// Conjunction of the task filters that are present. All are equality matches.
#[must_use]
pub fn task_matches(query: &TaskQueries, task: &task::Model) -> bool {
    query.status.is_none_or(|status| task.status == status)
        && query.priority.is_none_or(|priority| task.priority == priority)
        && query.project_id.is_none_or(|id| task.project_id == id)
        && query.author_id.is_none_or(|id| task.author_id == id)
        && query.executor_id.is_none_or(|id| task.executor_id == id)
}

pub fn apply_project_filters(query: &ProjectQueries, projects: &mut Vec<project::Model>) {
    projects.retain(|project| project_matches(query, project));
}

pub fn apply_task_filters(query: &TaskQueries, tasks: &mut Vec<task::Model>) {
    tasks.retain(|task| task_matches(query, task));
}
