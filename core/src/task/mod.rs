use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Opaque task identifier assigned by the backing store at creation.
pub type TaskId = String;

/// Identifier of the authenticated identity that owns a task.
pub type OwnerId = String;

/// A single task as held by the backing store.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; the client
/// never fabricates them. The owner is set at creation and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub owner: OwnerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task.
///
/// Construction is the only way to get a draft, so a draft always carries a
/// non-blank title. A blank or whitespace-only description is normalized to
/// `None` rather than stored as an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
}

impl TaskDraft {
    /// Builds a draft from raw form input.
    ///
    /// Returns [`TaskError::EmptyTitle`] when the title is empty or
    /// whitespace-only.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, TaskError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let description = description.into();
        let description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        Ok(Self { title, description })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A repository call failed.
///
/// String-based so the error stays `Clone + PartialEq` regardless of which
/// HTTP client sits behind the trait.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The request never completed (network failure, unreachable service).
    #[error("could not reach the task store: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("task store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Errors surfaced by the task lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error("no authenticated user")]
    NotAuthenticated,
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Request/response contract consumed from the external task repository.
///
/// Implementations perform a single atomic call per method; durability,
/// uniqueness and query execution are the store's concern.
#[async_trait(?Send)]
pub trait TaskStore {
    /// Fetches every task owned by `owner`, newest first.
    async fn list_owned(&self, owner: &str) -> Result<Vec<Task>, StoreError>;

    /// Inserts one task for `owner`. The store assigns id and timestamps and
    /// defaults `is_completed` to false.
    async fn insert(&self, owner: &str, draft: &TaskDraft) -> Result<(), StoreError>;

    /// Sets the completion flag of the task with the given id.
    async fn set_completed(&self, id: &str, completed: bool) -> Result<(), StoreError>;

    /// Deletes the task with the given id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Replaces the in-memory collection with a full snapshot from the store.
///
/// The returned list is the store's complete, creation-descending view for
/// `owner`; callers must not patch it locally between reloads.
pub async fn reload(store: &impl TaskStore, owner: &str) -> Result<Vec<Task>, TaskError> {
    Ok(store.list_owned(owner).await?)
}

/// Creates a task for the current identity.
///
/// The identity is resolved before anything else: when it is absent the store
/// is never called and [`TaskError::NotAuthenticated`] is returned.
pub async fn create(
    store: &impl TaskStore,
    identity: Option<&str>,
    draft: TaskDraft,
) -> Result<(), TaskError> {
    let owner = identity.ok_or(TaskError::NotAuthenticated)?;
    store.insert(owner, &draft).await?;
    Ok(())
}

/// Flips a task's completion flag, using the displayed state as the base.
///
/// Toggling twice therefore returns the task to its original value once the
/// follow-up reloads land.
pub async fn toggle(store: &impl TaskStore, task: &Task) -> Result<(), TaskError> {
    store.set_completed(&task.id, !task.is_completed).await?;
    Ok(())
}

/// Deletes a task by id.
pub async fn delete(store: &impl TaskStore, id: &str) -> Result<(), TaskError> {
    store.delete(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for the external store. Assigns sequential ids and
    /// strictly increasing timestamps so creation order is unambiguous, and
    /// counts inserts so tests can assert the store was never reached.
    struct FakeStore {
        tasks: RefCell<Vec<Task>>,
        next_id: Cell<u32>,
        insert_calls: Cell<usize>,
        fail_next: Cell<bool>,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                tasks: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
                insert_calls: Cell::new(0),
                fail_next: Cell::new(false),
            }
        }

        fn check_failure(&self) -> Result<(), StoreError> {
            if self.fail_next.take() {
                return Err(StoreError::Rejected {
                    status: 500,
                    message: "simulated store failure".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl TaskStore for FakeStore {
        async fn list_owned(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
            self.check_failure()?;
            let mut owned: Vec<Task> = self
                .tasks
                .borrow()
                .iter()
                .filter(|t| t.owner == owner)
                .cloned()
                .collect();
            owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(owned)
        }

        async fn insert(&self, owner: &str, draft: &TaskDraft) -> Result<(), StoreError> {
            self.insert_calls.set(self.insert_calls.get() + 1);
            self.check_failure()?;
            let seq = self.next_id.get();
            self.next_id.set(seq + 1);
            let created_at = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(seq as i64);
            self.tasks.borrow_mut().push(Task {
                id: format!("task-{seq}"),
                title: draft.title().to_string(),
                description: draft.description().map(str::to_string),
                is_completed: false,
                owner: owner.to_string(),
                created_at,
                updated_at: created_at,
            });
            Ok(())
        }

        async fn set_completed(&self, id: &str, completed: bool) -> Result<(), StoreError> {
            self.check_failure()?;
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks.iter_mut().find(|t| t.id == id).ok_or(StoreError::Rejected {
                status: 404,
                message: "no such task".to_string(),
            })?;
            task.is_completed = completed;
            task.updated_at = Utc::now();
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), StoreError> {
            self.check_failure()?;
            self.tasks.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn created_task_appears_in_next_reload_uncompleted() {
        let store = FakeStore::new();
        let draft = TaskDraft::new("Buy milk", "").unwrap();

        create(&store, Some("user-1"), draft).await.unwrap();

        let tasks = reload(&store, "user-1").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].description, None);
        assert!(!tasks[0].is_completed);
        assert_eq!(tasks[0].owner, "user-1");
    }

    #[tokio::test]
    async fn reload_returns_newest_task_first() {
        let store = FakeStore::new();
        create(&store, Some("user-1"), TaskDraft::new("First", "").unwrap())
            .await
            .unwrap();
        create(&store, Some("user-1"), TaskDraft::new("Second", "").unwrap())
            .await
            .unwrap();

        let tasks = reload(&store, "user-1").await.unwrap();

        assert_eq!(tasks[0].title, "Second");
        assert_eq!(tasks[1].title, "First");
    }

    #[tokio::test]
    async fn reload_only_returns_tasks_for_the_given_owner() {
        let store = FakeStore::new();
        create(&store, Some("user-1"), TaskDraft::new("Mine", "").unwrap())
            .await
            .unwrap();
        create(&store, Some("user-2"), TaskDraft::new("Theirs", "").unwrap())
            .await
            .unwrap();

        let tasks = reload(&store, "user-1").await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Mine");
    }

    #[tokio::test]
    async fn double_toggle_restores_original_completion_state() {
        let store = FakeStore::new();
        create(&store, Some("user-1"), TaskDraft::new("Flip me", "").unwrap())
            .await
            .unwrap();
        let before = reload(&store, "user-1").await.unwrap().remove(0);

        toggle(&store, &before).await.unwrap();
        let mid = reload(&store, "user-1").await.unwrap().remove(0);
        assert_eq!(mid.is_completed, !before.is_completed);

        toggle(&store, &mid).await.unwrap();
        let after = reload(&store, "user-1").await.unwrap().remove(0);
        assert_eq!(after.is_completed, before.is_completed);
    }

    #[tokio::test]
    async fn deleted_task_never_reappears() {
        let store = FakeStore::new();
        create(&store, Some("user-1"), TaskDraft::new("Keep", "").unwrap())
            .await
            .unwrap();
        create(&store, Some("user-1"), TaskDraft::new("Drop", "").unwrap())
            .await
            .unwrap();
        let doomed = reload(&store, "user-1")
            .await
            .unwrap()
            .into_iter()
            .find(|t| t.title == "Drop")
            .unwrap();

        delete(&store, &doomed.id).await.unwrap();

        let tasks = reload(&store, "user-1").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks.iter().all(|t| t.id != doomed.id));

        let tasks = reload(&store, "user-1").await.unwrap();
        assert!(tasks.iter().all(|t| t.id != doomed.id));
    }

    #[tokio::test]
    async fn unauthenticated_create_never_reaches_the_store() {
        let store = FakeStore::new();
        let draft = TaskDraft::new("Buy milk", "").unwrap();

        let result = create(&store, None, draft).await;

        assert_eq!(result, Err(TaskError::NotAuthenticated));
        assert_eq!(store.insert_calls.get(), 0);
        assert!(reload(&store, "user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_titles_create_distinct_tasks() {
        let store = FakeStore::new();
        create(&store, Some("user-1"), TaskDraft::new("Same", "").unwrap())
            .await
            .unwrap();
        create(&store, Some("user-1"), TaskDraft::new("Same", "").unwrap())
            .await
            .unwrap();

        let tasks = reload(&store, "user-1").await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_ne!(tasks[0].id, tasks[1].id);
        assert!(tasks.iter().all(|t| t.title == "Same"));
    }

    #[tokio::test]
    async fn failed_toggle_leaves_store_state_unchanged() {
        let store = FakeStore::new();
        create(&store, Some("user-1"), TaskDraft::new("Sticky", "").unwrap())
            .await
            .unwrap();
        let task = reload(&store, "user-1").await.unwrap().remove(0);

        store.fail_next.set(true);
        let result = toggle(&store, &task).await;

        assert!(matches!(result, Err(TaskError::Store(StoreError::Rejected { status: 500, .. }))));
        let after = reload(&store, "user-1").await.unwrap().remove(0);
        assert_eq!(after.is_completed, task.is_completed);
    }

    #[tokio::test]
    async fn failed_insert_is_reported_as_store_error() {
        let store = FakeStore::new();
        store.fail_next.set(true);

        let result = create(&store, Some("user-1"), TaskDraft::new("Nope", "").unwrap()).await;

        assert!(matches!(result, Err(TaskError::Store(_))));
        assert!(reload(&store, "user-1").await.unwrap().is_empty());
    }

    #[test]
    fn draft_rejects_empty_title() {
        assert_eq!(TaskDraft::new("", "details").unwrap_err(), TaskError::EmptyTitle);
        assert_eq!(TaskDraft::new("   ", "details").unwrap_err(), TaskError::EmptyTitle);
    }

    #[test]
    fn draft_normalizes_blank_description_to_none() {
        let draft = TaskDraft::new("Buy milk", "").unwrap();
        assert_eq!(draft.description(), None);

        let draft = TaskDraft::new("Buy milk", "  ").unwrap();
        assert_eq!(draft.description(), None);

        let draft = TaskDraft::new("Buy milk", "2 litres").unwrap();
        assert_eq!(draft.description(), Some("2 litres"));
    }

    #[test]
    fn draft_keeps_title_verbatim() {
        let draft = TaskDraft::new("  Buy milk  ", "").unwrap();
        assert_eq!(draft.title(), "  Buy milk  ");
    }
}
