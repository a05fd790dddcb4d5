//! MySQL dialect.

use super::Dialect;

/// MySQL quoting: identifiers are wrapped in backticks.
///
/// This is the default dialect for bulk statements since `INSERT IGNORE` and
/// `ON DUPLICATE KEY UPDATE` are MySQL syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_quoting() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.quote_identifier("100_a"), "`100_a`");
        assert_eq!(dialect.quote_identifier("odd`name"), "`odd``name`");
    }

    #[test]
    fn test_quoting_through_reference() {
        let dialect = MySqlDialect::new();
        let by_ref: &dyn Dialect = &dialect;
        assert_eq!(Dialect::quote_identifier(&by_ref, "users"), "`users`");
    }
}
