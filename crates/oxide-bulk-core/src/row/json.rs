//! `serde_json::Value` rows.
//!
//! A JSON object is a record: every key is a column. Nested objects and
//! arrays are treated as related records. The `id` key is the primary key and
//! `created_at` / `updated_at` keys are timestamps, where `null` or an empty
//! string counts as unset. Any other JSON value is not a record.
//!
//! Integers are bound as integers; unsigned integers above `i64::MAX` are
//! bound as decimal text and other numbers as floats.

use serde_json::Value;

use super::{BulkRow, FieldDescriptor};
use crate::error::ShapeError;
use crate::value::SqlValue;

impl BulkRow for Value {
    fn fields(&self) -> Result<Vec<FieldDescriptor>, ShapeError> {
        let Value::Object(map) = self else {
            return Err(ShapeError::new(kind_of(self)));
        };

        Ok(map
            .iter()
            .map(|(key, value)| {
                let mut field = FieldDescriptor::new(key.as_str(), to_sql_value(value));
                if key == "id" {
                    field = field.primary_key();
                }
                if matches!(value, Value::Object(_) | Value::Array(_)) {
                    field = field.relation();
                }
                field
            })
            .collect())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Int(i)
            } else if n.is_u64() {
                // Above i64::MAX: decimal text keeps every digit.
                SqlValue::Text(n.to_string())
            } else {
                SqlValue::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => SqlValue::Text(s.clone()),
        // Related records never reach the statement.
        Value::Array(_) | Value::Object(_) => SqlValue::Null,
    }
}
