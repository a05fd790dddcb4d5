//! Bulk INSERT assembly.
//!
//! - [`normalize`] turns one row into its column values
//! - [`BulkInsert`] turns a batch of rows into one statement
//! - [`chunks`] splits large batches into bounded statements
//! - [`InsertStrategy`] picks the SQL shape
//!
//! # Example
//!
//! ```rust
//! use oxide_bulk_core::bulk::BulkInsert;
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"id": 0, "name": "alice"}),
//!     json!({"id": 0, "name": "bob"}),
//! ];
//!
//! let statement = BulkInsert::insert_ignore()
//!     .into_table("users")
//!     .assemble(&rows)
//!     .unwrap()
//!     .unwrap();
//!
//! // The blank `id` is left to the database.
//! assert_eq!(statement.sql, "INSERT IGNORE INTO `users` (`name`) VALUES (?), (?)");
//! ```

mod assemble;
mod chunk;
mod normalize;
mod strategy;

pub use assemble::BulkInsert;
pub use chunk::{chunks, Chunk};
pub use normalize::{classify, normalize, Exclusion, FieldAction, RowValues};
pub use strategy::{Insert, InsertIgnore, InsertOnDuplicateKeyUpdate, InsertStrategy, Statement, StatementParts};
