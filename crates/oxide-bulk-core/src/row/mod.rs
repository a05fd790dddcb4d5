//! Row objects and their field metadata.
//!
//! The bulk assembler never inspects Rust types directly. Every row is asked
//! for a list of [`FieldDescriptor`]s through the [`BulkRow`] trait, which is
//! implemented by `#[derive(BulkRow)]`, by [`DynamicRow`], and by
//! `serde_json::Value`.

mod json;

use crate::error::ShapeError;
use crate::value::{SqlValue, ToSqlValue};

/// Which automatic timestamp a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampKind {
    /// Set when the row is first inserted (`created_at`).
    Created,
    /// Set on every write (`updated_at`).
    Updated,
}

impl TimestampKind {
    /// Detects the timestamp kind from a column name.
    #[must_use]
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "created_at" => Some(Self::Created),
            "updated_at" => Some(Self::Updated),
            _ => None,
        }
    }
}

/// Metadata and current value of one field of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Name of the field in the source type.
    pub name: String,
    /// SQL column name (unquoted).
    pub column: String,
    /// Current value of the field.
    pub value: SqlValue,
    /// Whether the field is the primary key.
    pub primary_key: bool,
    /// Auto increment marker: `None` when absent, otherwise whether it is on.
    pub auto_increment: Option<bool>,
    /// Foreign key the field is joined through, if any.
    pub foreign_key: Option<String>,
    /// Whether the field holds a related record rather than a column.
    pub relation: bool,
    /// Whether the field is excluded from persistence.
    pub ignored: bool,
    /// Default value declared for the column.
    pub default: Option<String>,
    /// Automatic timestamp kind, if any.
    pub timestamp: Option<TimestampKind>,
}

impl FieldDescriptor {
    /// Creates a plain column field whose column name equals the field name.
    ///
    /// Fields named `created_at` or `updated_at` are recognized as timestamps.
    pub fn new(name: impl Into<String>, value: impl ToSqlValue) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            timestamp: TimestampKind::from_column(&name),
            name,
            value: value.to_sql_value(),
            primary_key: false,
            auto_increment: None,
            foreign_key: None,
            relation: false,
            ignored: false,
            default: None,
        }
    }

    /// Sets the SQL column name.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Marks the field as primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the auto increment marker.
    #[must_use]
    pub const fn auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = Some(enabled);
        self
    }

    /// Marks the field as joined through the given foreign key.
    #[must_use]
    pub fn foreign_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_key = Some(key.into());
        self
    }

    /// Marks the field as a related record.
    #[must_use]
    pub const fn relation(mut self) -> Self {
        self.relation = true;
        self
    }

    /// Marks the field as ignored.
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Declares a column default.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets or clears the automatic timestamp kind.
    #[must_use]
    pub const fn timestamp(mut self, kind: Option<TimestampKind>) -> Self {
        self.timestamp = kind;
        self
    }

    /// Returns whether the current value is the blank value of its type.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }

    /// Returns whether the auto increment marker is present and not disabled.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment.unwrap_or(false)
    }
}

/// A value that can be written as one row of a bulk INSERT.
///
/// Implementations describe every field of the row; the normalizer decides
/// which of them become columns.
pub trait BulkRow {
    /// Table the row belongs to (unquoted), if the row knows it.
    fn table_name(&self) -> Option<&str> {
        None
    }

    /// Describes the fields of this row.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] when the value is not a record.
    fn fields(&self) -> Result<Vec<FieldDescriptor>, ShapeError>;
}

impl<T: BulkRow + ?Sized> BulkRow for &T {
    fn table_name(&self) -> Option<&str> {
        (**self).table_name()
    }

    fn fields(&self) -> Result<Vec<FieldDescriptor>, ShapeError> {
        (**self).fields()
    }
}

impl<T: BulkRow + ?Sized> BulkRow for Box<T> {
    fn table_name(&self) -> Option<&str> {
        (**self).table_name()
    }

    fn fields(&self) -> Result<Vec<FieldDescriptor>, ShapeError> {
        (**self).fields()
    }
}

/// A row assembled by hand from field descriptors.
///
/// # Example
///
/// ```rust
/// use oxide_bulk_core::row::{BulkRow, DynamicRow, FieldDescriptor};
///
/// let row = DynamicRow::new("users")
///     .field(FieldDescriptor::new("id", 0_i64).primary_key())
///     .field(FieldDescriptor::new("name", "alice"));
///
/// assert_eq!(row.table_name(), Some("users"));
/// assert_eq!(row.fields().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRow {
    table: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl DynamicRow {
    /// Creates an empty row for the given table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            fields: Vec::new(),
        }
    }

    /// Creates an empty row that does not name its table.
    #[must_use]
    pub const fn untabled() -> Self {
        Self {
            table: None,
            fields: Vec::new(),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

impl BulkRow for DynamicRow {
    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn fields(&self) -> Result<Vec<FieldDescriptor>, ShapeError> {
        Ok(self.fields.clone())
    }
}
