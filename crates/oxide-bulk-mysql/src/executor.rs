//! Statement execution against a MySQL pool.

use oxide_bulk_core::executor::StatementExecutor;
use oxide_bulk_core::value::SqlValue;
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool};
use sqlx::query::Query;
use tracing::debug;

/// Executes bulk statements on a [`MySqlPool`].
///
/// Each statement runs on one pooled connection. Arguments are bound
/// positionally in the order the assembler produced them.
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    /// Wraps a connection pool.
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Unwraps the executor into its pool.
    #[must_use]
    pub fn into_inner(self) -> MySqlPool {
        self.pool
    }
}

impl From<MySqlPool> for MySqlExecutor {
    fn from(pool: MySqlPool) -> Self {
        Self::new(pool)
    }
}

impl StatementExecutor for MySqlExecutor {
    type Error = sqlx::Error;

    async fn execute(&self, sql: &str, args: Vec<SqlValue>) -> Result<u64, Self::Error> {
        debug!(args = args.len(), "Executing bulk statement");

        let query = args.into_iter().fold(sqlx::query(sql), bind_value);
        let result = query.execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

/// Binds a SqlValue parameter to a query.
fn bind_value(
    query: Query<'_, MySql, MySqlArguments>,
    value: SqlValue,
) -> Query<'_, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
        SqlValue::Timestamp(t) => query.bind(t),
    }
}
