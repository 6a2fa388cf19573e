//! Core domain model and task lifecycle rules for Taskboard.
pub mod task;

pub use task::{OwnerId, StoreError, Task, TaskDraft, TaskError, TaskId, TaskStore};
