//! SQLite user repository (embedded, no external server)

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use userbase_core::{Result, UserRecord, UserRepository, UserbaseError};

pub struct SqliteUserRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUserRepository {
    /// Open (creating if missing) the database file and bootstrap the schema.
    pub async fn new(database_path: &Path, max_connections: u32) -> AnyResult<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path.display());

        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to SQLite database at: {}",
                    database_path.display()
                )
            })?;

        tracing::info!("SQLite connection established, ensuring schema...");
        Self::from_pool(pool).await
    }

    /// Private in-memory database. One connection that never expires, since
    /// every new connection to `sqlite::memory:` would see an empty database.
    pub async fn in_memory() -> AnyResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> AnyResult<Self> {
        Self::ensure_schema(&pool)
            .await
            .context("Failed to create users table")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn ensure_schema(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                age INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Close every pooled connection. Later calls fail as unavailable.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, uuid, first_name, last_name, age
            FROM users ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_by_identifier(&self, id: &str) -> Result<UserRecord> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, uuid, first_name, last_name, age
            FROM users WHERE uuid = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| r.into())
            .ok_or_else(|| UserbaseError::NotFound(id.to_string()))
    }

    async fn insert(&self, mut record: UserRecord) -> Result<UserRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (uuid, first_name, last_name, age)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&record.identifier)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.age)
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() != 1 {
            return Err(UserbaseError::Storage(format!(
                "insert of {} affected {} rows",
                record.identifier,
                result.rows_affected()
            )));
        }

        record.primary_key = Some(result.last_insert_rowid());
        Ok(record)
    }
}

/// Connection-level failures mean the medium is unreachable; anything else
/// (constraint violations, decode failures) is a plain storage error.
pub fn map_sqlx_error(e: sqlx::Error) -> UserbaseError {
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => UserbaseError::StorageUnavailable(e.to_string()),
        other => UserbaseError::Storage(other.to_string()),
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    uuid: String,
    first_name: String,
    last_name: String,
    age: i64,
}

impl From<UserRow> for UserRecord {
    fn from(r: UserRow) -> Self {
        UserRecord {
            primary_key: Some(r.id),
            identifier: r.uuid,
            first_name: r.first_name,
            last_name: r.last_name,
            age: r.age,
        }
    }
}
