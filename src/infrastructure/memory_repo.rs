use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    error::{TodoError, TodoResult},
    repository::{sorted, TodoRepository},
    todo::{Todo, TodoId},
};

/// In-process store. Many concurrent readers, one writer at a time.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn init(&self) -> TodoResult<()> { Ok(()) }

    async fn add(&self, todo: Todo) -> TodoResult<()> {
        tracing::debug!(id = %todo.id, "insert");
        self.items.write().await.insert(todo.id.clone(), todo);
        Ok(())
    }

    async fn get(&self, id: &TodoId) -> TodoResult<Option<Todo>> { Ok(self.items.read().await.get(id).cloned()) }

    async fn list(&self) -> TodoResult<Vec<Todo>> {
        let todos = self.items.read().await.values().cloned().collect();
        Ok(sorted(todos))
    }

    async fn update(&self, id: &TodoId, completed: bool) -> TodoResult<Todo> {
        let mut map = self.items.write().await;
        let Some(todo) = map.get_mut(id) else { return Err(TodoError::NotFound(id.clone())) };
        todo.completed = completed;
        Ok(todo.clone())
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        match self.items.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(TodoError::NotFound(id.clone())),
        }
    }
}
