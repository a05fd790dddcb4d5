//! # oxide-bulk-mysql
//!
//! Runs bulk INSERT statements assembled by `oxide-bulk-core` on MySQL through
//! `sqlx`.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_bulk_derive::BulkRow;
//! use oxide_bulk_mysql::prelude::*;
//!
//! #[derive(BulkRow)]
//! #[table(name = "users")]
//! struct User {
//!     #[column(primary_key)]
//!     id: i64,
//!     name: String,
//!     created_at: Option<chrono::DateTime<chrono::Utc>>,
//! }
//!
//! let pool = sqlx::MySqlPool::connect("mysql://root@localhost/app").await?;
//! let users = vec![
//!     User { id: 0, name: "alice".into(), created_at: None },
//!     User { id: 0, name: "bob".into(), created_at: None },
//! ];
//!
//! bulk_insert(&pool, &users).await?;
//!
//! // Large inputs go in chunks; failed chunks are reported, the rest still run.
//! let failures = bulk_exec_chunked(&pool, InsertIgnore, &users, 1000).await;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Preview the statements for a JSON file of rows
//! oxide-bulk --table users --dry-run users.json
//!
//! # Upsert in chunks of 500 rows
//! DATABASE_URL=mysql://root@localhost/app oxide-bulk --table users --mode upsert --chunk-size 500 users.json
//! ```

pub mod executor;
pub mod input;

use oxide_bulk_core::bulk::{
    BulkInsert, Insert, InsertIgnore, InsertOnDuplicateKeyUpdate, InsertStrategy, Statement,
};
use oxide_bulk_core::error::{ChunkError, Result};
use oxide_bulk_core::row::BulkRow;
use oxide_bulk_core::value::SqlValue;
use sqlx::MySqlPool;

pub use executor::MySqlExecutor;

/// Inserts all `rows` with one `INSERT INTO` statement.
///
/// # Errors
///
/// Returns assembly errors, or the database error of the statement.
pub async fn bulk_insert<R: BulkRow>(pool: &MySqlPool, rows: &[R]) -> Result<u64> {
    bulk_exec(pool, Insert, rows).await
}

/// Inserts all `rows` with one `INSERT IGNORE INTO` statement.
///
/// # Errors
///
/// Returns assembly errors, or the database error of the statement.
pub async fn bulk_insert_ignore<R: BulkRow>(pool: &MySqlPool, rows: &[R]) -> Result<u64> {
    bulk_exec(pool, InsertIgnore, rows).await
}

/// Inserts all `rows` with one `INSERT INTO .. ON DUPLICATE KEY UPDATE`
/// statement.
///
/// # Errors
///
/// Returns assembly errors, or the database error of the statement.
pub async fn bulk_insert_on_duplicate_key_update<R: BulkRow>(
    pool: &MySqlPool,
    rows: &[R],
) -> Result<u64> {
    bulk_exec(pool, InsertOnDuplicateKeyUpdate, rows).await
}

/// Inserts all `rows` with one statement built by `strategy`.
///
/// # Errors
///
/// Returns assembly errors, or the database error of the statement.
pub async fn bulk_exec<S, R>(pool: &MySqlPool, strategy: S, rows: &[R]) -> Result<u64>
where
    S: InsertStrategy,
    R: BulkRow,
{
    let executor = MySqlExecutor::new(pool.clone());
    BulkInsert::new(strategy).exec(&executor, rows).await
}

/// Inserts `rows` in chunks of at most `chunk_size`, one statement per chunk.
///
/// Returns the failed chunks in order; an empty list means every chunk was
/// inserted.
pub async fn bulk_exec_chunked<S, R>(
    pool: &MySqlPool,
    strategy: S,
    rows: &[R],
    chunk_size: usize,
) -> Vec<ChunkError>
where
    S: InsertStrategy,
    R: BulkRow,
{
    let executor = MySqlExecutor::new(pool.clone());
    BulkInsert::new(strategy)
        .exec_chunked(&executor, rows, chunk_size)
        .await
}

/// Renders a statement and its arguments for display.
///
/// Arguments are shown inline-escaped after the SQL; the SQL itself keeps its
/// placeholders.
#[must_use]
pub fn render_statement(statement: &Statement) -> String {
    let args: Vec<String> = statement.args.iter().map(SqlValue::to_sql_inline).collect();
    format!("{};\n-- args: [{}]", statement.sql, args.join(", "))
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::executor::MySqlExecutor;
    pub use crate::{
        bulk_exec, bulk_exec_chunked, bulk_insert, bulk_insert_ignore,
        bulk_insert_on_duplicate_key_update, render_statement,
    };
    pub use oxide_bulk_core::bulk::{
        BulkInsert, Insert, InsertIgnore, InsertOnDuplicateKeyUpdate, InsertStrategy, Statement,
        StatementParts,
    };
    pub use oxide_bulk_core::error::{BulkError, ChunkError};
    pub use oxide_bulk_core::row::{BulkRow, DynamicRow, FieldDescriptor};
    pub use oxide_bulk_core::value::{SqlValue, ToSqlValue};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_statement() {
        let statement = Statement {
            sql: String::from("INSERT INTO `tests` (`bar`, `foo`) VALUES (?, ?)"),
            args: vec![SqlValue::Text(String::from("it's")), SqlValue::Null],
        };
        assert_eq!(
            render_statement(&statement),
            "INSERT INTO `tests` (`bar`, `foo`) VALUES (?, ?);\n-- args: ['it''s', NULL]"
        );
    }
}
