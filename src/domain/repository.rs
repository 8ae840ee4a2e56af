use async_trait::async_trait;
use super::error::TodoResult;
use super::todo::{Todo, TodoId};

/// The store contract shared by the in-memory and file-backed variants.
/// Implementations own the collection behind a single synchronization
/// boundary and hand out copies only.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> TodoResult<()>;
    /// Inserts, silently overwriting any record with the same id.
    async fn add(&self, todo: Todo) -> TodoResult<()>;
    async fn get(&self, id: &TodoId) -> TodoResult<Option<Todo>>;
    /// Snapshot ordered by creation time, oldest first.
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    async fn update(&self, id: &TodoId, completed: bool) -> TodoResult<Todo>;
    async fn delete(&self, id: &TodoId) -> TodoResult<()>;
}

pub(crate) fn sorted(mut todos: Vec<Todo>) -> Vec<Todo> {
    todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    todos
}
