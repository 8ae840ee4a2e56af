//! Tool-call dispatch: maps a named operation plus its JSON arguments onto the
//! [`TodoService`] and renders the outcome as the human-readable text returned
//! to the caller.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::todo_service::TodoService;
use crate::domain::error::{TodoError, TodoResult};
use crate::domain::todo::{Todo, TodoId};

pub const ADD_TODO: &str = "add_todo";
pub const GET_TODOS: &str = "get_todos";
pub const UPDATE_TODO: &str = "update_todo";
pub const DELETE_TODO: &str = "delete_todo";

pub const TOOL_NAMES: [&str; 4] = [ADD_TODO, GET_TODOS, UPDATE_TODO, DELETE_TODO];

/// Shown by `get_todos` when the store is empty.
pub const EMPTY_LIST_MESSAGE: &str = "no todos";

#[derive(Debug, Deserialize)]
struct AddTodoArgs { title: String }

#[derive(Debug, Deserialize)]
struct UpdateTodoArgs { id: String, completed: bool }

#[derive(Debug, Deserialize)]
struct DeleteTodoArgs { id: String }

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    AddTodo { title: String },
    GetTodos,
    UpdateTodo { id: TodoId, completed: bool },
    DeleteTodo { id: TodoId },
}

impl ToolCall {
    /// Checks the tool name and that every required argument is present with
    /// the right type. `null` arguments are read as an empty object.
    pub fn parse(name: &str, arguments: Value) -> TodoResult<Self> {
        let arguments = if arguments.is_null() { Value::Object(Default::default()) } else { arguments };
        match name {
            ADD_TODO => {
                let args: AddTodoArgs = parse_args(name, arguments)?;
                if args.title.is_empty() {
                    return Err(TodoError::validation("title must not be empty"));
                }
                Ok(Self::AddTodo { title: args.title })
            }
            GET_TODOS => Ok(Self::GetTodos),
            UPDATE_TODO => {
                let args: UpdateTodoArgs = parse_args(name, arguments)?;
                Ok(Self::UpdateTodo { id: non_empty_id(args.id)?, completed: args.completed })
            }
            DELETE_TODO => {
                let args: DeleteTodoArgs = parse_args(name, arguments)?;
                Ok(Self::DeleteTodo { id: non_empty_id(args.id)? })
            }
            other => Err(TodoError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> TodoResult<T> {
    serde_json::from_value(arguments).map_err(|e| TodoError::validation(format!("invalid arguments for {tool}: {e}")))
}

fn non_empty_id(id: String) -> TodoResult<TodoId> {
    if id.trim().is_empty() {
        return Err(TodoError::validation("id must not be empty"));
    }
    Ok(TodoId(id))
}

#[derive(Clone)]
pub struct Dispatcher<S: TodoService> {
    service: S,
}

impl<S: TodoService> Dispatcher<S> {
    pub fn new(service: S) -> Self { Self { service } }

    pub fn service(&self) -> &S { &self.service }

    pub async fn call(&self, name: &str, arguments: Value) -> TodoResult<String> {
        let call = ToolCall::parse(name, arguments)?;
        tracing::debug!(tool = name, ?call, "dispatching tool call");
        self.execute(call).await
    }

    pub async fn execute(&self, call: ToolCall) -> TodoResult<String> {
        match call {
            ToolCall::AddTodo { title } => {
                let todo = self.service.create(title).await?;
                Ok(format!("added {}, id: {}", todo.title, todo.id))
            }
            ToolCall::GetTodos => Ok(render_list(&self.service.list().await?)),
            ToolCall::UpdateTodo { id, completed } => {
                self.service.update(&id, completed).await?;
                let status = if completed { "completed" } else { "incomplete" };
                Ok(format!("updated {id} to {status}"))
            }
            ToolCall::DeleteTodo { id } => {
                self.service.delete(&id).await?;
                Ok(format!("deleted todo with id {id}"))
            }
        }
    }
}

pub fn render_todo(todo: &Todo) -> String { format!("{} {} (ID: {})", todo.checkbox(), todo.title, todo.id) }

pub fn render_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    todos.iter().map(render_todo).collect::<Vec<_>>().join("\n")
}
