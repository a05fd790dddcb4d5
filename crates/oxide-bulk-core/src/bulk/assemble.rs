//! Batch assembly: many rows into one multi-row statement.

use tracing::{debug, warn};

use super::chunk::chunks;
use super::normalize::{collect_values, normalize, RowValues};
use super::strategy::{Insert, InsertIgnore, InsertOnDuplicateKeyUpdate, InsertStrategy, Statement, StatementParts};
use crate::clock::{Clock, SystemClock};
use crate::dialect::{Dialect, MySqlDialect};
use crate::error::{BulkError, ChunkError, Result};
use crate::executor::StatementExecutor;
use crate::row::BulkRow;
use crate::value::SqlValue;

/// Builds bulk INSERT statements from rows.
///
/// The first row of every batch fixes the column set. Columns are ordered by
/// their unquoted names and quoted afterwards, so quoting never changes the
/// order. Blank timestamps of every row receive the same instant, read once
/// from the clock per statement.
///
/// # Example
///
/// ```rust
/// use oxide_bulk_core::bulk::BulkInsert;
/// use oxide_bulk_core::row::{DynamicRow, FieldDescriptor};
///
/// let rows = vec![
///     DynamicRow::new("tests")
///         .field(FieldDescriptor::new("foo", "one"))
///         .field(FieldDescriptor::new("bar", "two")),
///     DynamicRow::new("tests")
///         .field(FieldDescriptor::new("foo", "three"))
///         .field(FieldDescriptor::new("bar", "four")),
/// ];
///
/// let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
/// assert_eq!(
///     statement.sql,
///     "INSERT INTO `tests` (`bar`, `foo`) VALUES (?, ?), (?, ?)"
/// );
/// assert_eq!(statement.args.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BulkInsert<S, D = MySqlDialect, C = SystemClock> {
    strategy: S,
    dialect: D,
    clock: C,
    table: Option<String>,
    insert_option: Option<String>,
}

impl BulkInsert<Insert> {
    /// Plain `INSERT INTO`.
    #[must_use]
    pub fn insert() -> Self {
        Self::new(Insert)
    }
}

impl BulkInsert<InsertIgnore> {
    /// `INSERT IGNORE INTO`.
    #[must_use]
    pub fn insert_ignore() -> Self {
        Self::new(InsertIgnore)
    }
}

impl BulkInsert<InsertOnDuplicateKeyUpdate> {
    /// `INSERT INTO .. ON DUPLICATE KEY UPDATE` over every column.
    #[must_use]
    pub fn insert_on_duplicate_key_update() -> Self {
        Self::new(InsertOnDuplicateKeyUpdate)
    }
}

impl<S: InsertStrategy> BulkInsert<S> {
    /// Creates a builder with a custom strategy, MySQL quoting and the
    /// system clock.
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            dialect: MySqlDialect,
            clock: SystemClock,
            table: None,
            insert_option: None,
        }
    }
}

impl<S: InsertStrategy, D: Dialect, C: Clock> BulkInsert<S, D, C> {
    /// Replaces the dialect used for quoting identifiers.
    #[must_use]
    pub fn with_dialect<D2: Dialect>(self, dialect: D2) -> BulkInsert<S, D2, C> {
        BulkInsert {
            strategy: self.strategy,
            dialect,
            clock: self.clock,
            table: self.table,
            insert_option: self.insert_option,
        }
    }

    /// Replaces the clock used for blank timestamps.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> BulkInsert<S, D, C2> {
        BulkInsert {
            strategy: self.strategy,
            dialect: self.dialect,
            clock,
            table: self.table,
            insert_option: self.insert_option,
        }
    }

    /// Inserts into `table` instead of the table named by the rows.
    #[must_use]
    pub fn into_table(mut self, table: &str) -> Self {
        self.table = Some(String::from(table));
        self
    }

    /// Appends a raw clause after the values, e.g.
    /// `ON DUPLICATE KEY UPDATE foo = VALUES(foo)`.
    ///
    /// Only strategies that support it use the clause.
    #[must_use]
    pub fn insert_option(mut self, clause: &str) -> Self {
        self.insert_option = Some(String::from(clause));
        self
    }

    /// Assembles one statement for all `rows`.
    ///
    /// Returns `Ok(None)` when there are no rows.
    ///
    /// # Errors
    ///
    /// Fails on the first row that is not a record of distinct columns
    /// ([`BulkError::Shape`]) or whose columns differ from the first row's
    /// ([`BulkError::ColumnMismatch`]), and when no table name is known
    /// ([`BulkError::MissingTable`]). No statement is produced on error.
    pub fn assemble<R: BulkRow>(&self, rows: &[R]) -> Result<Option<Statement>> {
        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let now = self.clock.now();

        let first_values = first
            .fields()
            .and_then(|fields| collect_values(fields, now))
            .map_err(|source| BulkError::Shape { row: 0, source })?;

        let table = self
            .table
            .as_deref()
            .or_else(|| first.table_name())
            .ok_or(BulkError::MissingTable)?;

        // Sorted by unquoted name; quoting happens only after the order is fixed.
        let columns: Vec<String> = first_values.keys().cloned().collect();
        let quoted_columns: Vec<String> = columns
            .iter()
            .map(|col| self.dialect.quote_identifier(col))
            .collect();

        let placeholders = vec![self.dialect.parameter_placeholder(); columns.len()];
        let group = format!("({})", placeholders.join(", "));

        let mut args = Vec::with_capacity(rows.len() * columns.len());
        args.extend(row_args(0, &columns, first_values)?);

        for (index, row) in rows.iter().enumerate().skip(1) {
            let values = normalize(row, now).map_err(|source| BulkError::Shape { row: index, source })?;
            args.extend(row_args(index, &columns, values)?);
        }

        let groups = vec![group; rows.len()];
        let quoted_table = self.dialect.quote_identifier(table);
        let parts = StatementParts {
            table: &quoted_table,
            columns: &quoted_columns,
            groups: &groups,
            insert_option: self.insert_option.as_deref(),
        };

        let mut statement = Statement {
            sql: String::new(),
            args,
        };
        self.strategy.apply(&parts, &mut statement);

        debug!(
            dialect = self.dialect.name(),
            table = %table,
            rows = rows.len(),
            columns = columns.len(),
            "Assembled bulk statement"
        );

        Ok(Some(statement))
    }

    /// Assembles and executes one statement for all `rows`.
    ///
    /// Returns the number of affected rows; no rows means nothing is executed
    /// and `0` is returned.
    ///
    /// # Errors
    ///
    /// Returns assembly errors as in [`BulkInsert::assemble`] and executor
    /// failures as [`BulkError::Execution`].
    pub async fn exec<E, R>(&self, executor: &E, rows: &[R]) -> Result<u64>
    where
        E: StatementExecutor,
        R: BulkRow,
    {
        let Some(statement) = self.assemble(rows)? else {
            return Ok(0);
        };

        executor
            .execute(&statement.sql, statement.args)
            .await
            .map_err(|e| BulkError::Execution(Box::new(e)))
    }

    /// Executes `rows` in chunks of at most `chunk_size` rows, one statement
    /// per chunk.
    ///
    /// Every chunk is attempted even when an earlier one fails. The failures
    /// are returned in chunk order; an empty list means every chunk
    /// succeeded. A `chunk_size` of zero disables chunking.
    pub async fn exec_chunked<E, R>(&self, executor: &E, rows: &[R], chunk_size: usize) -> Vec<ChunkError>
    where
        E: StatementExecutor,
        R: BulkRow,
    {
        let mut errors = Vec::new();

        for chunk in chunks(rows, chunk_size) {
            if let Err(source) = self.exec(executor, chunk.rows).await {
                warn!(
                    chunk = chunk.index,
                    start = chunk.range.start,
                    end = chunk.range.end,
                    error = %source,
                    "Bulk chunk failed"
                );
                errors.push(ChunkError {
                    index: chunk.index,
                    rows: chunk.range,
                    source,
                });
            }
        }

        errors
    }
}

/// Lays out one row's values in column order.
fn row_args(index: usize, columns: &[String], mut values: RowValues) -> Result<Vec<SqlValue>> {
    let mut args = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();

    for col in columns {
        match values.remove(col) {
            Some(value) => args.push(value),
            None => missing.push(col.clone()),
        }
    }

    if missing.is_empty() && values.is_empty() {
        Ok(args)
    } else {
        Err(BulkError::ColumnMismatch {
            row: index,
            missing,
            unexpected: values.into_keys().collect(),
        })
    }
}
