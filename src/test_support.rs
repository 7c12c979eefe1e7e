//! Shared fixtures for unit tests

use std::path::Path;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::{init_database, DatabaseConfig};

async fn migrated(config: DatabaseConfig) -> DatabaseConnection {
    let db = init_database(&config).await.expect("sqlite connection");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

/// Fresh, migrated in-memory SQLite database
pub async fn memory_db() -> DatabaseConnection {
    migrated(DatabaseConfig::in_memory()).await
}

/// Migrated SQLite file under `dir`, served by a pool of several
/// connections so writes can contend
pub async fn file_db(dir: &Path) -> DatabaseConnection {
    let path = dir.join("gateway.db");
    migrated(DatabaseConfig {
        max_connections: Some(8),
        ..DatabaseConfig::sqlite(path.to_str().expect("utf-8 temp path"))
    })
    .await
}
