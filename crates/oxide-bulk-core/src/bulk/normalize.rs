//! Row normalization: from field descriptors to column values.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::ShapeError;
use crate::row::{BulkRow, FieldDescriptor};
use crate::value::SqlValue;

/// Column values of one row keyed by unquoted column name.
///
/// Keys iterate in byte order, which is the canonical column order of a
/// bulk statement.
pub type RowValues = BTreeMap<String, SqlValue>;

/// Why a field does not become a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Joined through a foreign key or holding a related record.
    Relation,
    /// Explicitly ignored.
    Ignored,
    /// Blank with a declared default; the database fills it in.
    Default,
    /// Generated by the database (auto increment or blank `id` primary key).
    Identity,
}

/// What the normalizer does with a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAction {
    /// The field is left out of the statement.
    Exclude(Exclusion),
    /// The field is written with the given value.
    Include(SqlValue),
}

/// Decides how one field is written.
///
/// Rules apply in order: relations, ignored fields, blank fields with a
/// declared default (timestamps excepted), identity columns, timestamps, and
/// finally everything else as-is. A blank timestamp takes `now`.
#[must_use]
pub fn classify(field: &FieldDescriptor, now: DateTime<Utc>) -> FieldAction {
    if field.foreign_key.is_some() || field.relation {
        return FieldAction::Exclude(Exclusion::Relation);
    }

    if field.ignored {
        return FieldAction::Exclude(Exclusion::Ignored);
    }

    let blank = field.is_blank();

    if field.default.is_some() && blank && field.timestamp.is_none() {
        return FieldAction::Exclude(Exclusion::Default);
    }

    if field.is_auto_increment() || (field.column == "id" && field.primary_key && blank) {
        return FieldAction::Exclude(Exclusion::Identity);
    }

    if field.timestamp.is_some() && blank {
        return FieldAction::Include(SqlValue::Timestamp(now));
    }

    FieldAction::Include(field.value.clone())
}

/// Normalizes a row into its column values.
///
/// `now` is the instant used for blank timestamp fields; the caller reads it
/// once per batch.
///
/// # Errors
///
/// Returns a [`ShapeError`] when the row is not a record, or when two
/// written fields map to the same column.
pub fn normalize<R: BulkRow + ?Sized>(row: &R, now: DateTime<Utc>) -> Result<RowValues, ShapeError> {
    collect_values(row.fields()?, now)
}

/// Applies [`classify`] to every field and keeps the included ones.
pub(crate) fn collect_values(
    fields: impl IntoIterator<Item = FieldDescriptor>,
    now: DateTime<Utc>,
) -> Result<RowValues, ShapeError> {
    let mut values = RowValues::new();

    for field in fields {
        if let FieldAction::Include(value) = classify(&field, now) {
            match values.entry(field.column) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(slot) => {
                    return Err(ShapeError::duplicate_column(slot.key().as_str()));
                }
            }
        }
    }

    Ok(values)
}
