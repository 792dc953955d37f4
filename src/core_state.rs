//! Shared application state.
//!
//! `CoreState` is built once at startup, wrapped in `Arc`, and shared by every
//! request. It owns no connection: each request opens its own through
//! `open_db()`, so SQLite's WAL lets readers run while a writer holds the lock.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::db;
use crate::matching::MatchingEngine;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct CoreState {
    pub config: AppConfig,
    pub engine: MatchingEngine,
}

impl CoreState {
    /// Prepare the database file (directory, pragmas, migrations) and build
    /// the engine with the configured release policy.
    pub fn new(config: AppConfig) -> Result<Self, CoreError> {
        if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| CoreError::DataDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        // Migrations run here once; later connections find the schema current.
        db::open_database(&config.db_path)?;

        tracing::info!(
            db = %config.db_path.display(),
            policy = config.release_policy.as_str(),
            "Core state ready"
        );

        Ok(Self {
            engine: MatchingEngine::sqlite(config.release_policy),
            config,
        })
    }

    /// Open a fresh connection for one request.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        Ok(db::open_database(&self.config.db_path)?)
    }

    pub fn db_path(&self) -> &Path {
        &self.config.db_path
    }
}
