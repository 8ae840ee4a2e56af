use todo_tools::application::{dispatcher::Dispatcher, todo_service::TodoServiceImpl};
use todo_tools::config::{Config, StoreBackend};
use todo_tools::domain::repository::TodoRepository;
use todo_tools::http::routing;
use todo_tools::http::routes::tools;
use todo_tools::infrastructure::{json_file_repo::JsonFileTodoRepository, memory_repo::InMemoryTodoRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    match config.backend.clone() {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            serve(&config, InMemoryTodoRepository::new()).await
        }
        StoreBackend::JsonFile(dir) => {
            let repo = JsonFileTodoRepository::new(&dir);
            tracing::info!(path = %repo.path().display(), "using file-backed store");
            serve(&config, repo).await
        }
    }
}

async fn serve<R: TodoRepository + Clone>(config: &Config, repo: R) -> anyhow::Result<()> {
    repo.init().await?;
    let dispatcher = Dispatcher::new(TodoServiceImpl::new(repo));
    let router = routing::app(tools::router(tools::AppState { dispatcher }));

    let addr = config.addr;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
