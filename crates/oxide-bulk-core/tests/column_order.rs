//! Column order of assembled statements.
//!
//! Columns are sorted by their unquoted names and quoted afterwards. With
//! backtick quoting, `` `time` `` sorts after `` `time_from` `` because the
//! closing backtick (0x60) is greater than `_` (0x5F), so sorting quoted names
//! would give a different order.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use oxide_bulk_core::bulk::{BulkInsert, Statement, StatementParts};
use oxide_bulk_core::{DynamicRow, FieldDescriptor, GenericDialect, SqlValue};
use oxide_bulk_derive::BulkRow;

#[derive(Debug, Clone, BulkRow)]
pub struct Ordered {
    pub xxx: i64,
    pub time: DateTime<Utc>,
    pub time_from: DateTime<Utc>,
    pub aaa: String,
    #[column(name = "100_aa")]
    pub n1: String,
    #[column(name = "100_a")]
    pub n2: String,
}

fn ordered_row() -> Ordered {
    Ordered {
        xxx: 0,
        time: DateTime::default(),
        time_from: DateTime::default(),
        aaa: String::new(),
        n1: String::new(),
        n2: String::new(),
    }
}

#[test]
fn test_columns_sorted_before_quoting() {
    let seen = RefCell::new(Vec::new());
    let capture = |parts: &StatementParts<'_>, statement: &mut Statement| {
        seen.borrow_mut().extend(parts.columns.iter().cloned());
        statement.sql = String::from("INSERT INTO");
    };

    let statement = BulkInsert::new(capture)
        .assemble(&[ordered_row()])
        .unwrap()
        .unwrap();
    assert_eq!(statement.sql, "INSERT INTO");

    let columns = seen.into_inner();
    let expected = ["`100_a`", "`100_aa`", "`aaa`", "`time`", "`time_from`", "`xxx`"];
    assert_eq!(columns, expected);

    // Sorting the quoted names gives a different order.
    let mut quoted_sort = columns.clone();
    quoted_sort.sort();
    assert_ne!(quoted_sort, expected);
    assert_eq!(
        quoted_sort,
        ["`100_a`", "`100_aa`", "`aaa`", "`time_from`", "`time`", "`xxx`"]
    );
}

#[test]
fn test_values_follow_column_order() {
    let row = DynamicRow::new("letters")
        .field(FieldDescriptor::new("c", 3_i64))
        .field(FieldDescriptor::new("a", 1_i64))
        .field(FieldDescriptor::new("b", 2_i64));
    let rows = vec![row.clone(), row];

    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();

    assert_eq!(
        statement.sql,
        "INSERT INTO `letters` (`a`, `b`, `c`) VALUES (?, ?, ?), (?, ?, ?)"
    );
    let expected: Vec<SqlValue> = [1, 2, 3, 1, 2, 3].into_iter().map(SqlValue::Int).collect();
    assert_eq!(statement.args, expected);
}

#[test]
fn test_field_order_does_not_matter_between_rows() {
    let rows = vec![
        DynamicRow::new("t")
            .field(FieldDescriptor::new("a", "a0"))
            .field(FieldDescriptor::new("b", "b0")),
        DynamicRow::new("t")
            .field(FieldDescriptor::new("b", "b1"))
            .field(FieldDescriptor::new("a", "a1")),
    ];

    let statement = BulkInsert::insert()
        .with_dialect(GenericDialect)
        .assemble(&rows)
        .unwrap()
        .unwrap();

    assert_eq!(statement.sql, "INSERT INTO \"t\" (\"a\", \"b\") VALUES (?, ?), (?, ?)");
    let args: Vec<String> = statement.args.iter().map(SqlValue::to_sql_inline).collect();
    assert_eq!(args, ["'a0'", "'b0'", "'a1'", "'b1'"]);
}

#[test]
fn test_argument_positions() {
    let rows: Vec<DynamicRow> = (0..4_i64)
        .map(|i| {
            DynamicRow::new("grid")
                .field(FieldDescriptor::new("x", i))
                .field(FieldDescriptor::new("y", i * 10))
                .field(FieldDescriptor::new("z", i * 100))
        })
        .collect();

    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    let column_count = 3;

    assert_eq!(statement.sql.matches("(?, ?, ?)").count(), rows.len());
    assert_eq!(statement.args.len(), rows.len() * column_count);

    for (i, arg) in statement.args.iter().enumerate() {
        let row = i64::try_from(i / column_count).unwrap();
        let scale = [1, 10, 100][i % column_count];
        assert_eq!(arg, &SqlValue::Int(row * scale));
    }
}
