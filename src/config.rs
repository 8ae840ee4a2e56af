use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Which store variant to run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    /// Directory that holds `todos.json`.
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub backend: StoreBackend,
}

impl Config {
    /// Reads `TODO_ADDR` and `TODO_STORE_DIR` from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup("TODO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr.parse().with_context(|| format!("invalid TODO_ADDR {raw_addr:?}"))?;
        let backend = match lookup("TODO_STORE_DIR") {
            Some(dir) if !dir.trim().is_empty() => StoreBackend::JsonFile(PathBuf::from(dir)),
            _ => StoreBackend::Memory,
        };
        Ok(Self { addr, backend })
    }
}
