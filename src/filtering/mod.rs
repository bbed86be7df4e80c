//! # List Filtering & Sorting
//!
//! List views load their rows, drop the ones that fail the query predicates
//! and then sort by the key named in `sortOrder`.
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Projects starting on or after March 1st, highest priority first
//! GET /Projects?startDate=2024-03-01&sortOrder=priorityDesc
//!
//! // Finished tasks of priority 2 (status by name or number)
//! GET /Tasks?status=Done&priority=2
//! GET /Tasks?status=2&priority=2
//!
//! // Tasks ordered by the executor's first name
//! GET /Tasks?sortOrder=executor
//! ```
//!
//! Empty parameters count as absent, and an unknown `sortOrder` falls back
//! to ascending name order. Sorting is stable, so rows with equal keys stay
//! in id order.

pub mod conditions;
pub mod sort;

pub use conditions::{apply_project_filters, apply_task_filters, project_matches, task_matches};
pub use sort::{
    Direction, ProjectSortKey, SortKey, SortOrder, TaskSortKey, compare_projects, compare_tasks,
    next_sort_tokens,
};
