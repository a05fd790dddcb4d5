//! ANSI quoting.

use super::Dialect;

/// Standard SQL quoting: identifiers are wrapped in double quotes.
///
/// Useful for previews and for servers that accept MySQL statement shapes
/// with `ANSI_QUOTES` enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn identifier_quote(&self) -> char {
        '"'
    }
}
