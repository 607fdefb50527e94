use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

pub mod config;
pub mod controllers;
pub mod routes;
pub mod service;
pub mod store;
pub mod telemetry;

use crate::service::MessageService;
use crate::store::SqliteMessageStore;

pub const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub service: MessageService,
}

impl AppState {
    /// Collega service e store SQLite sullo stesso pool.
    pub fn new(pool: SqlitePool) -> Self {
        let store = SqliteMessageStore::new(pool.clone());
        Self { pool, service: MessageService::new(Arc::new(store)) }
    }
}

/// Prepara il file del database e ne restituisce l'URL `sqlite://` assoluto.
///
/// Il percorso non può contenere `?` o `#`: nell'URL verrebbero letti come query o fragment
/// e sqlx aprirebbe un file diverso da quello preparato qui.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let raw = p.to_string_lossy();
    if let Some(bad) = raw.chars().find(|c| matches!(c, '?' | '#')) {
        anyhow::bail!("database path {:?} contains {:?}; pass a plain file path", raw, bad);
    }
    let abs = std::path::absolute(p).with_context(|| format!("resolve database path {:?}", p))?;
    ensure_db_file(&abs)?;
    Ok(format!("sqlite://{}", abs.to_string_lossy().replace('\\', "/")))
}

// Cartelle mancanti e file vuoto; un file esistente resta com'è.
fn ensure_db_file(abs: &Path) -> anyhow::Result<()> {
    if let Some(dir) = abs.parent().filter(|d| !d.exists()) {
        std::fs::create_dir_all(dir).with_context(|| format!("create database dir {:?}", dir))?;
    }
    if !abs.exists() {
        std::fs::File::create(abs).with_context(|| format!("create database file {:?}", abs))?;
    }
    Ok(())
}

/// Crea un DB URL SQLite a partire dal valore configurato (DATABASE_URL o --database-url).
/// "sqlite::memory:" viene restituito così com'è.
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == MEMORY_URL {
        return Ok(raw.to_string());
    }
    // Rimuovi il prefisso "sqlite://" se presente, per ottenere il percorso del file.
    let path_part = if raw.starts_with("sqlite:") {
        raw.trim_start_matches("sqlite://").trim_start_matches("sqlite:")
    } else {
        raw
    };
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
// In-memory databases are per-connection, so the pool is pinned to a single long-lived one.
pub async fn connect_pool(db_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parse sqlite url {}", db_url))?
        .create_if_missing(true);

    let pool_options = if db_url == MEMORY_URL {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea tabella e indice se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id         TEXT PRIMARY KEY,
            author     TEXT NOT NULL,
            content    TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            like_count INTEGER NOT NULL DEFAULT 0
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    tracing::debug!("migrations applied");
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
