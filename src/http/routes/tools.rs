use axum::{body::Bytes, extract::{Path, State}, routing::post, Json, Router};
use serde_json::Value;

use crate::application::{dispatcher::Dispatcher, todo_service::TodoService};
use crate::http::types::{ApiError, ToolOutput};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub dispatcher: Dispatcher<S> }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/tools/:name", post(call_tool::<S>))
        .with_state(state)
}

async fn call_tool<S: TodoService + Clone>(State(state): State<AppState<S>>, Path(name): Path<String>, body: Bytes) -> Result<Json<ToolOutput>, ApiError> {
    let arguments = parse_arguments(&body)?;
    let text = state.dispatcher.call(&name, arguments).await.map_err(|e| {
        tracing::debug!(tool = %name, error = %e, "tool call failed");
        ApiError::from(e)
    })?;
    Ok(Json(ToolOutput { text }))
}

// An empty body means "no arguments".
fn parse_arguments(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) { return Ok(Value::Null); }
    match serde_json::from_slice::<Value>(body) {
        Ok(v @ (Value::Object(_) | Value::Null)) => Ok(v),
        Ok(_) => Err(ApiError::bad_request("arguments must be a JSON object")),
        Err(e) => Err(ApiError::bad_request(format!("invalid JSON arguments: {e}"))),
    }
}
