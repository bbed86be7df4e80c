//! Sea-ORM entities for the four relations of the schema.
//!
//! Relations are plain foreign-key columns. Back-references (an employee's
//! projects, a project's tasks) are never loaded into the models; workflows
//! resolve them on demand through the lookups in [`crate::operations`].

pub mod employee;
pub mod project;
pub mod project_employee;
pub mod task;

pub use task::TaskStatus;
