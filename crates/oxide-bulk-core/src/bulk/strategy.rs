//! Statement strategies: the SQL shape of a bulk statement.
//!
//! The assembler hands a strategy the quoted table, the quoted columns in
//! canonical order, and one placeholder group per row. The strategy writes
//! the SQL text into the [`Statement`]; it may also replace the arguments.

use crate::value::SqlValue;

/// A parameterized SQL statement and its positional arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Arguments in placeholder order.
    pub args: Vec<SqlValue>,
}

/// Everything a strategy may use to render a statement.
#[derive(Debug, Clone, Copy)]
pub struct StatementParts<'a> {
    /// Quoted table name.
    pub table: &'a str,
    /// Quoted column names in canonical order.
    pub columns: &'a [String],
    /// One placeholder group per row, e.g. `(?, ?)`.
    pub groups: &'a [String],
    /// Raw clause appended after the values by strategies that accept it.
    pub insert_option: Option<&'a str>,
}

/// Renders a bulk statement.
///
/// Any `Fn(&StatementParts, &mut Statement)` closure is a strategy.
///
/// # Example
///
/// ```rust
/// use oxide_bulk_core::bulk::{InsertStrategy, Statement, StatementParts};
///
/// let replace = |parts: &StatementParts<'_>, statement: &mut Statement| {
///     statement.sql = format!(
///         "REPLACE INTO {} ({}) VALUES {}",
///         parts.table,
///         parts.columns.join(", "),
///         parts.groups.join(", "),
///     );
/// };
///
/// let columns = [String::from("`name`")];
/// let groups = [String::from("(?)")];
/// let parts = StatementParts {
///     table: "`users`",
///     columns: &columns,
///     groups: &groups,
///     insert_option: None,
/// };
/// let mut statement = Statement::default();
/// replace.apply(&parts, &mut statement);
/// assert_eq!(statement.sql, "REPLACE INTO `users` (`name`) VALUES (?)");
/// ```
pub trait InsertStrategy {
    /// Writes the SQL for `parts` into `statement`.
    fn apply(&self, parts: &StatementParts<'_>, statement: &mut Statement);
}

impl<F: Fn(&StatementParts<'_>, &mut Statement)> InsertStrategy for F {
    fn apply(&self, parts: &StatementParts<'_>, statement: &mut Statement) {
        self(parts, statement);
    }
}

/// `INSERT INTO t (..) VALUES (..), (..)`, followed by the insert option when
/// one is set.
///
/// ```text
/// INSERT INTO `tbl`
///   (col1, col2)
/// VALUES
///   (?, ?), (?, ?)
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Insert;

/// `INSERT IGNORE INTO t (..) VALUES (..)`. The insert option is not used.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertIgnore;

/// `INSERT INTO t (..) VALUES (..) ON DUPLICATE KEY UPDATE c = VALUES(c), ..`
///
/// Every column of the statement is updated with its new value.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertOnDuplicateKeyUpdate;

fn values_clause(keyword: &str, parts: &StatementParts<'_>) -> String {
    format!(
        "{keyword} {} ({}) VALUES {}",
        parts.table,
        parts.columns.join(", "),
        parts.groups.join(", "),
    )
}

impl InsertStrategy for Insert {
    fn apply(&self, parts: &StatementParts<'_>, statement: &mut Statement) {
        let mut sql = values_clause("INSERT INTO", parts);
        if let Some(option) = parts.insert_option {
            sql.push(' ');
            sql.push_str(option);
        }
        statement.sql = sql;
    }
}

impl InsertStrategy for InsertIgnore {
    fn apply(&self, parts: &StatementParts<'_>, statement: &mut Statement) {
        statement.sql = values_clause("INSERT IGNORE INTO", parts);
    }
}

impl InsertStrategy for InsertOnDuplicateKeyUpdate {
    fn apply(&self, parts: &StatementParts<'_>, statement: &mut Statement) {
        let updates: Vec<String> = parts
            .columns
            .iter()
            .map(|col| format!("{col} = VALUES({col})"))
            .collect();

        statement.sql = format!(
            "{} ON DUPLICATE KEY UPDATE {}",
            values_clause("INSERT INTO", parts),
            updates.join(", ")
        );
    }
}
