use review_core::db::{open_db, open_db_in_memory, open_db_with_config, table_exists};
use review_core::{DbLocation, StoreConfig};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_employee_table_only() {
    let conn = open_db_in_memory().unwrap();

    assert!(table_exists(&conn, "employee").unwrap());
    assert!(!table_exists(&conn, "reviews").unwrap());
    assert_eq!(foreign_keys(&conn), 1);
}

#[test]
fn reopening_database_keeps_employee_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO employee (name, job_title) VALUES ('Ada', 'Engineer');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(employee_count(&second), 1);
}

#[test]
fn opening_existing_database_adopts_its_employee_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE employee (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            job_title TEXT NOT NULL
        );
        INSERT INTO employee (id, name, job_title) VALUES (4, 'Grace', 'Admiral');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(employee_count(&conn), 1);
}

#[test]
fn config_can_disable_foreign_keys() {
    let config = StoreConfig {
        foreign_keys: false,
        ..StoreConfig::memory()
    };
    let conn = open_db_with_config(&config).unwrap();
    assert_eq!(foreign_keys(&conn), 0);
    assert!(table_exists(&conn, "employee").unwrap());
}

#[test]
fn opening_unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("reviews.db");

    assert!(open_db(&path).is_err());
}

#[test]
fn store_config_deserializes_with_defaults() {
    let config: StoreConfig =
        serde_json::from_value(serde_json::json!({ "location": { "file": "/data/reviews.db" } }))
            .unwrap();
    assert_eq!(config.location, DbLocation::File("/data/reviews.db".into()));
    assert_eq!(config.busy_timeout_ms, 5_000);
    assert!(config.foreign_keys);

    let config: StoreConfig = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(config, StoreConfig::memory());
}

fn foreign_keys(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap()
}

fn employee_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM employee;", [], |row| row.get(0))
        .unwrap()
}
