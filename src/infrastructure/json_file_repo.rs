use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use crate::domain::{
    error::{TodoError, TodoResult},
    repository::{sorted, TodoRepository},
    todo::{Todo, TodoId},
};

pub const STORE_FILE_NAME: &str = "todos.json";

type Collection = BTreeMap<TodoId, Todo>;

/// Store persisted as one pretty-printed JSON object (id -> record).
///
/// Every operation reads the whole file, and every mutation rewrites it.
/// All of them run under one mutex, so concurrent mutations can no longer
/// lose each other's writes. Writes land in a sibling temp file that is then
/// renamed over the store file; there is still no recovery for a file that is
/// already corrupt, and a failed write is reported, not rolled back.
#[derive(Clone)]
pub struct JsonFileTodoRepository {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileTodoRepository {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(STORE_FILE_NAME), lock: Arc::new(Mutex::new(())) }
    }

    pub fn path(&self) -> &Path { &self.path }

    async fn read_all(&self) -> TodoResult<Collection> {
        let data = fs::read(&self.path).await.map_err(|e| TodoError::persistence(&self.path, e))?;
        // `null` is read as an empty collection.
        let todos: Option<Collection> = serde_json::from_slice(&data).map_err(|e| TodoError::persistence(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "read store file");
        Ok(todos.unwrap_or_default())
    }

    async fn write_all(&self, todos: &Collection) -> TodoResult<()> {
        let data = serde_json::to_vec_pretty(todos).map_err(|e| TodoError::persistence(&self.path, e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(|e| TodoError::persistence(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(TodoError::persistence(&self.path, e));
        }
        tracing::debug!(path = %self.path.display(), count = todos.len(), "wrote store file");
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for JsonFileTodoRepository {
    async fn init(&self) -> TodoResult<()> {
        let _guard = self.lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| TodoError::persistence(parent, e))?;
            }
        }
        let exists = fs::try_exists(&self.path).await.map_err(|e| TodoError::persistence(&self.path, e))?;
        if !exists {
            tracing::info!(path = %self.path.display(), "creating empty store file");
            self.write_all(&Collection::new()).await?;
        }
        Ok(())
    }

    async fn add(&self, todo: Todo) -> TodoResult<()> {
        let _guard = self.lock.lock().await;
        let mut todos = self.read_all().await?;
        todos.insert(todo.id.clone(), todo);
        self.write_all(&todos).await
    }

    async fn get(&self, id: &TodoId) -> TodoResult<Option<Todo>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(id))
    }

    async fn list(&self) -> TodoResult<Vec<Todo>> {
        let _guard = self.lock.lock().await;
        let todos = self.read_all().await?;
        Ok(sorted(todos.into_values().collect()))
    }

    async fn update(&self, id: &TodoId, completed: bool) -> TodoResult<Todo> {
        let _guard = self.lock.lock().await;
        let mut todos = self.read_all().await?;
        let Some(todo) = todos.get_mut(id) else { return Err(TodoError::NotFound(id.clone())) };
        todo.completed = completed;
        let updated = todo.clone();
        self.write_all(&todos).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        let _guard = self.lock.lock().await;
        let mut todos = self.read_all().await?;
        if todos.remove(id).is_none() {
            return Err(TodoError::NotFound(id.clone()));
        }
        self.write_all(&todos).await
    }
}
