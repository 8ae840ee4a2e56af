use axum::body::to_bytes;
use axum::Router;
use serde_json::json;
use todo_tools::application::{dispatcher::Dispatcher, todo_service::TodoServiceImpl};
use todo_tools::domain::repository::TodoRepository;
use todo_tools::http::{routes::tools, routing};
use todo_tools::infrastructure::{json_file_repo::JsonFileTodoRepository, memory_repo::InMemoryTodoRepository};

fn app<R: TodoRepository + Clone>(repo: R) -> Router {
    let dispatcher = Dispatcher::new(TodoServiceImpl::new(repo));
    routing::app(tools::router(tools::AppState { dispatcher }))
}

#[tokio::test]
async fn acceptance_add_list_update_delete() {
    let app = app(InMemoryTodoRepository::new());

    // empty
    let (status, body) = call(&app, "get_todos", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["text"], "no todos");

    // add
    let (status, body) = call(&app, "add_todo", Some(json!({ "title": "Buy milk" }))).await;
    assert_eq!(status, 200);
    let text = body["text"].as_str().unwrap().to_string();
    let id = text.strip_prefix("added Buy milk, id: ").unwrap().to_string();

    // list
    let (_, body) = call(&app, "get_todos", Some(json!({}))).await;
    assert_eq!(body["text"], format!("[ ] Buy milk (ID: {id})"));

    // update
    let (status, body) = call(&app, "update_todo", Some(json!({ "id": id, "completed": true }))).await;
    assert_eq!(status, 200);
    assert_eq!(body["text"], format!("updated {id} to completed"));
    let (_, body) = call(&app, "get_todos", None).await;
    assert_eq!(body["text"], format!("[x] Buy milk (ID: {id})"));

    // delete
    let (status, body) = call(&app, "delete_todo", Some(json!({ "id": id }))).await;
    assert_eq!(status, 200);
    assert_eq!(body["text"], format!("deleted todo with id {id}"));

    // gone
    let (status, _) = call(&app, "delete_todo", Some(json!({ "id": id }))).await;
    assert_eq!(status, 404);
    let (status, body) = call(&app, "update_todo", Some(json!({ "id": id, "completed": false }))).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], format!("todo not found: {id}"));
}

#[tokio::test]
async fn acceptance_validation_errors() {
    let app = app(InMemoryTodoRepository::new());

    let (status, body) = call(&app, "add_todo", Some(json!({ "title": "" }))).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "title must not be empty");

    let (status, _) = call(&app, "add_todo", None).await;
    assert_eq!(status, 400);
    let (status, _) = call(&app, "update_todo", Some(json!({ "id": "x" }))).await;
    assert_eq!(status, 400);
    let (status, _) = call(&app, "add_todo", Some(json!(["not", "an", "object"]))).await;
    assert_eq!(status, 400);

    let (status, body) = call(&app, "rename_todo", Some(json!({}))).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "unknown tool: rename_todo");

    let (_, body) = call(&app, "get_todos", None).await;
    assert_eq!(body["text"], "no todos");
}

#[tokio::test]
async fn acceptance_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileTodoRepository::new(dir.path());
    repo.init().await.unwrap();
    let first = app(repo);
    let (status, _) = call(&first, "add_todo", Some(json!({ "title": "Persist me" }))).await;
    assert_eq!(status, 200);

    let repo = JsonFileTodoRepository::new(dir.path());
    repo.init().await.unwrap();
    let second = app(repo);
    let (_, body) = call(&second, "get_todos", None).await;
    assert!(body["text"].as_str().unwrap().starts_with("[ ] Persist me (ID: "));
}

#[tokio::test]
async fn acceptance_corrupt_file_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileTodoRepository::new(dir.path());
    repo.init().await.unwrap();
    std::fs::write(repo.path(), "{ broken").unwrap();
    let app = app(repo);

    let (status, body) = call(&app, "get_todos", None).await;
    assert_eq!(status, 500);
    assert!(body["message"].as_str().unwrap().starts_with("persistence error: "));
}

#[tokio::test]
async fn health() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = app(InMemoryTodoRepository::new());
    let res = app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn tool_names_are_listed() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = app(InMemoryTodoRepository::new());
    let res = app.oneshot(Request::builder().uri("/tools").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), 1024).await.unwrap()).unwrap();
    assert_eq!(body, json!(["add_todo", "get_todos", "update_todo", "delete_todo"]));
}

async fn call(app: &Router, tool: &str, args: Option<serde_json::Value>) -> (u16, serde_json::Value) {
    let res = request(app, &format!("/tools/{tool}"), args).await;
    let status = res.status().as_u16();
    let body = serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap();
    (status, body)
}

async fn request(app: &Router, path: &str, body: Option<serde_json::Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::POST).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}
