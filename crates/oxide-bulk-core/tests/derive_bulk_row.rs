//! Tests for rows described by `#[derive(BulkRow)]`.
//!
//! These tests verify the field policy applied to derived rows:
//! - relations and foreign keys are left out
//! - blank `id` primary keys and auto increment columns are left out
//! - blank fields with a declared default are left out
//! - `created_at` / `updated_at` receive one timestamp per statement

use chrono::{DateTime, TimeZone, Utc};
use oxide_bulk_core::bulk::BulkInsert;
use oxide_bulk_core::row::BulkRow;
use oxide_bulk_core::{FixedClock, SqlValue, TimestampKind};
use oxide_bulk_derive::BulkRow;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn past() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1985, 1, 1, 0, 0, 0).unwrap()
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

// =============================================================================
// Test: Table names
// =============================================================================

#[derive(Debug, Clone, BulkRow)]
pub struct Test {
    pub foo: String,
    pub bar: String,
}

#[derive(Debug, Clone, BulkRow)]
#[table(name = "products")]
pub struct Product {
    #[column(primary_key)]
    pub id: i64,
    pub title: String,
}

#[test]
fn test_default_table_name_is_snake_case() {
    assert_eq!(Test::TABLE_NAME, "test");
    let row = Test {
        foo: String::from("one"),
        bar: String::from("two"),
    };
    assert_eq!(row.table_name(), Some("test"));
}

#[test]
fn test_custom_table_name() {
    assert_eq!(Product::TABLE_NAME, "products");
}

#[test]
fn test_plain_rows() {
    let rows = vec![
        Test {
            foo: String::from("expected foo"),
            bar: String::from("expected bar"),
        };
        2
    ];

    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();

    assert_eq!(
        statement.sql,
        "INSERT INTO `test` (`bar`, `foo`) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(
        statement.args,
        vec![
            text("expected bar"),
            text("expected foo"),
            text("expected bar"),
            text("expected foo"),
        ]
    );
}

#[test]
fn test_references_and_boxes_are_rows() {
    let a = Test {
        foo: String::from("a"),
        bar: String::from("b"),
    };
    let rows: Vec<&Test> = vec![&a, &a];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(statement.args.len(), 4);

    let boxed: Vec<Box<dyn BulkRow>> = vec![Box::new(a.clone()), Box::new(a)];
    let statement = BulkInsert::insert().assemble(&boxed).unwrap().unwrap();
    assert_eq!(statement.args.len(), 4);
}

// =============================================================================
// Test: Primary keys
// =============================================================================

#[test]
fn test_blank_primary_key_is_left_out() {
    let rows = vec![Product {
        id: 0,
        title: String::from("foo"),
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(statement.sql, "INSERT INTO `products` (`title`) VALUES (?)");
}

#[test]
fn test_set_primary_key_is_written() {
    let rows = vec![Product {
        id: 42,
        title: String::from("foo"),
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `products` (`id`, `title`) VALUES (?, ?)"
    );
    assert_eq!(statement.args, vec![SqlValue::Int(42), text("foo")]);
}

// =============================================================================
// Test: Relations and foreign keys
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Related {
    pub id: i64,
    pub field: String,
}

#[derive(Debug, Clone, BulkRow)]
#[table(name = "tts")]
pub struct WithRelation {
    #[column(primary_key)]
    pub id: i64,
    pub field: String,
    #[column(relation)]
    pub t: Related,
    pub t_id: i64,
}

#[derive(Debug, Clone, BulkRow)]
#[table(name = "ttts")]
pub struct WithForeignKey {
    #[column(primary_key)]
    pub id: i64,
    pub field: String,
    #[column(foreign_key = "random_id")]
    pub t: Related,
    pub random_id: i64,
}

#[test]
fn test_relations_are_left_out() {
    let rows = vec![WithRelation {
        id: 0,
        field: String::from("keep me"),
        t: Related::default(),
        t_id: 3,
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `tts` (`field`, `t_id`) VALUES (?, ?)"
    );
    assert_eq!(statement.args, vec![text("keep me"), SqlValue::Int(3)]);
}

#[test]
fn test_foreign_keys_are_left_out() {
    let rows = vec![WithForeignKey {
        id: 0,
        field: String::from("keep me"),
        t: Related::default(),
        random_id: 3,
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `ttts` (`field`, `random_id`) VALUES (?, ?)"
    );
    assert_eq!(statement.args, vec![text("keep me"), SqlValue::Int(3)]);
}

// =============================================================================
// Test: Auto increment, ignored fields and defaults
// =============================================================================

#[derive(Debug, Clone, BulkRow)]
pub struct AutoIncrement {
    #[column(autoincrement)]
    pub not_id: i64,
    pub foo: String,
    #[column(ignore)]
    pub ignore_me: Related,
}

#[derive(Debug, Clone, BulkRow)]
pub struct AutoIncrementOff {
    #[column(autoincrement = false)]
    pub not_id: i64,
    pub foo: String,
}

#[derive(Debug, Clone, BulkRow)]
pub struct WithDefault {
    #[column(autoincrement)]
    pub id: i64,
    #[column(default = "'foobar'")]
    pub foo: String,
    pub bar: String,
}

#[test]
fn test_auto_increment_and_ignored_fields_are_left_out() {
    let rows = vec![AutoIncrement {
        not_id: 0,
        foo: String::from("foo"),
        ignore_me: Related::default(),
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `auto_increment` (`foo`) VALUES (?)"
    );
}

#[test]
fn test_disabled_auto_increment_is_written() {
    let rows = vec![AutoIncrementOff {
        not_id: 0,
        foo: String::from("foo"),
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `auto_increment_off` (`foo`, `not_id`) VALUES (?, ?)"
    );
}

#[test]
fn test_blank_default_is_left_to_the_database() {
    let rows = vec![WithDefault {
        id: 0,
        foo: String::new(),
        bar: String::from("barbar"),
    }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(statement.sql, "INSERT INTO `with_default` (`bar`) VALUES (?)");
    assert_eq!(statement.args, vec![text("barbar")]);
}

#[test]
fn test_defaulted_column_never_reaches_the_update_clause() {
    let rows = vec![WithDefault {
        id: 0,
        foo: String::new(),
        bar: String::from("barbar"),
    }];
    let statement = BulkInsert::insert_on_duplicate_key_update()
        .assemble(&rows)
        .unwrap()
        .unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `with_default` (`bar`) VALUES (?) ON DUPLICATE KEY UPDATE `bar` = VALUES(`bar`)"
    );
}

// =============================================================================
// Test: Timestamps
// =============================================================================

#[derive(Debug, Clone, BulkRow)]
#[table(name = "time_ts")]
pub struct TimeT {
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, BulkRow)]
pub struct Stamped {
    pub foo: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, BulkRow)]
pub struct Tagged {
    #[column(created_at, name = "inserted")]
    pub first_seen: DateTime<Utc>,
}

#[test]
fn test_same_time_for_all_records() {
    let rows = vec![
        TimeT {
            created_at: DateTime::default(),
        };
        3
    ];

    let statement = BulkInsert::insert()
        .with_clock(FixedClock(now()))
        .assemble(&rows)
        .unwrap()
        .unwrap();

    assert_eq!(
        statement.sql,
        "INSERT INTO `time_ts` (`created_at`) VALUES (?), (?), (?)"
    );
    assert_eq!(statement.args, vec![SqlValue::Timestamp(now()); 3]);
}

#[test]
fn test_same_time_with_system_clock() {
    let started = Utc::now();
    let rows: Vec<Stamped> = ["this is foo", "this is bar", "this is baz"]
        .iter()
        .map(|foo| Stamped {
            foo: String::from(*foo),
            created_at: None,
            updated_at: None,
        })
        .collect();

    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO `stamped` (`created_at`, `foo`, `updated_at`) VALUES (?, ?, ?), (?, ?, ?), (?, ?, ?)"
    );

    let SqlValue::Timestamp(batch_time) = statement.args[0] else {
        panic!("expected a timestamp, got {:?}", statement.args[0]);
    };
    assert!(batch_time >= started);

    for row in statement.args.chunks(3) {
        assert_eq!(row[0], SqlValue::Timestamp(batch_time));
        assert_eq!(row[2], SqlValue::Timestamp(batch_time));
    }
}

#[test]
fn test_set_timestamps_persist() {
    let rows = vec![Stamped {
        foo: String::from("this is foo"),
        created_at: Some(past()),
        updated_at: Some(past()),
    }];

    let statement = BulkInsert::insert()
        .with_clock(FixedClock(now()))
        .assemble(&rows)
        .unwrap()
        .unwrap();

    assert_eq!(
        statement.args,
        vec![
            SqlValue::Timestamp(past()),
            text("this is foo"),
            SqlValue::Timestamp(past()),
        ]
    );
}

#[derive(Debug, Clone, BulkRow)]
#[table(name = "clashes")]
pub struct Clash {
    pub name: String,
    #[column(name = "name")]
    pub alias: String,
}

#[test]
fn test_two_fields_on_one_column_are_rejected() {
    let rows = vec![Clash {
        name: String::from("first"),
        alias: String::from("second"),
    }];
    let err = BulkInsert::insert().assemble(&rows).unwrap_err();
    assert_eq!(
        err.to_string(),
        "row 0: column `name` is written by more than one field"
    );
}

#[test]
fn test_wide_integer_fields() {
    #[derive(Debug, Clone, BulkRow)]
    #[table(name = "counters")]
    pub struct Counter {
        pub hits: u64,
    }

    let rows = vec![Counter { hits: 3 }, Counter { hits: u64::MAX }];
    let statement = BulkInsert::insert().assemble(&rows).unwrap().unwrap();
    assert_eq!(
        statement.args,
        vec![SqlValue::Int(3), text("18446744073709551615")]
    );
}

#[test]
fn test_timestamp_attribute() {
    let row = Tagged {
        first_seen: DateTime::default(),
    };
    let fields = row.fields().unwrap();
    assert_eq!(fields[0].column, "inserted");
    assert_eq!(fields[0].timestamp, Some(TimestampKind::Created));

    let statement = BulkInsert::insert_on_duplicate_key_update()
        .with_clock(FixedClock(now()))
        .assemble(&[row])
        .unwrap()
        .unwrap();

    assert_eq!(
        statement.sql,
        "INSERT INTO `tagged` (`inserted`) VALUES (?) ON DUPLICATE KEY UPDATE `inserted` = VALUES(`inserted`)"
    );
    assert_eq!(statement.args, vec![SqlValue::Timestamp(now())]);
}
