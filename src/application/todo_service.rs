use crate::domain::error::{TodoError, TodoResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Todo, TodoId};
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, title: String) -> TodoResult<Todo>;
    async fn get(&self, id: &TodoId) -> TodoResult<Option<Todo>>;
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    async fn update(&self, id: &TodoId, completed: bool) -> TodoResult<Todo>;
    async fn delete(&self, id: &TodoId) -> TodoResult<()>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, title: String) -> TodoResult<Todo> {
        if title.is_empty() {
            return Err(TodoError::validation("title must not be empty"));
        }
        let todo = Todo::new(title);
        self.repo.add(todo.clone()).await?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn get(&self, id: &TodoId) -> TodoResult<Option<Todo>> { self.repo.get(id).await }
    async fn list(&self) -> TodoResult<Vec<Todo>> { self.repo.list().await }

    async fn update(&self, id: &TodoId, completed: bool) -> TodoResult<Todo> {
        let todo = self.repo.update(id, completed).await.inspect_err(|e| log_miss(id, e))?;
        tracing::info!(%id, completed, "todo updated");
        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        self.repo.delete(id).await.inspect_err(|e| log_miss(id, e))?;
        tracing::info!(%id, "todo deleted");
        Ok(())
    }
}

fn log_miss(id: &TodoId, err: &TodoError) {
    if matches!(err, TodoError::NotFound(_)) { tracing::warn!(%id, "no such todo"); }
}
