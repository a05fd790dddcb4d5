//! Statement execution capability.
//!
//! Assembly performs no I/O. Running a statement is delegated to a
//! [`StatementExecutor`], which owns connections, transactions and
//! timeouts.

use crate::value::SqlValue;

/// Runs a parameterized statement.
///
/// # Example
///
/// ```ignore
/// use oxide_bulk_core::executor::StatementExecutor;
/// use oxide_bulk_core::SqlValue;
///
/// struct Printer;
///
/// impl StatementExecutor for Printer {
///     type Error = std::convert::Infallible;
///
///     async fn execute(&self, sql: &str, args: Vec<SqlValue>) -> Result<u64, Self::Error> {
///         println!("{sql} -- {} args", args.len());
///         Ok(0)
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait StatementExecutor {
    /// Error reported by the underlying driver.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes `sql` with positional `args` and returns the affected row
    /// count.
    async fn execute(&self, sql: &str, args: Vec<SqlValue>) -> Result<u64, Self::Error>;
}
