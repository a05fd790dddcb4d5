//! # oxide-bulk-core
//!
//! Multi-row INSERT statements built from rows of structured values.
//!
//! This crate provides:
//! - A row model ([`BulkRow`], [`FieldDescriptor`]) describing every field of a
//!   row, implemented by `#[derive(BulkRow)]`, [`DynamicRow`] and
//!   `serde_json::Value`
//! - A normalizer deciding which fields become columns
//! - A batch assembler producing one parameterized statement for many rows
//! - Plain, `IGNORE` and `ON DUPLICATE KEY UPDATE` statement strategies, plus
//!   custom ones
//! - Chunked execution through any [`StatementExecutor`]
//!
//! ## Example
//!
//! ```rust
//! use oxide_bulk_core::{BulkInsert, DynamicRow, FieldDescriptor, SqlValue};
//!
//! let rows = vec![
//!     DynamicRow::new("users")
//!         .field(FieldDescriptor::new("id", 0_i64).primary_key())
//!         .field(FieldDescriptor::new("name", "alice"))
//!         .field(FieldDescriptor::new("created_at", SqlValue::Null)),
//!     DynamicRow::new("users")
//!         .field(FieldDescriptor::new("id", 0_i64).primary_key())
//!         .field(FieldDescriptor::new("name", "bob"))
//!         .field(FieldDescriptor::new("created_at", SqlValue::Null)),
//! ];
//!
//! let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
//!
//! assert_eq!(
//!     statement.sql,
//!     "INSERT INTO `users` (`created_at`, `name`) VALUES (?, ?), (?, ?)"
//! );
//! // Both rows share one generated timestamp.
//! assert_eq!(statement.args[0], statement.args[2]);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always bound as parameters. Identifiers are quoted by the
//! configured [`Dialect`](dialect::Dialect).

pub mod bulk;
pub mod clock;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod row;
pub mod value;

pub use bulk::{BulkInsert, Insert, InsertIgnore, InsertOnDuplicateKeyUpdate, InsertStrategy, Statement, StatementParts};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dialect::{Dialect, GenericDialect, MySqlDialect};
pub use error::{BulkError, ChunkError, Result, ShapeError};
pub use executor::StatementExecutor;
pub use row::{BulkRow, DynamicRow, FieldDescriptor, TimestampKind};
pub use value::{SqlValue, ToSqlValue};
