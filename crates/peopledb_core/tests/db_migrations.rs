use peopledb_core::db::migrations::{latest_version, schema_version};
use peopledb_core::db::{open_db, open_db_in_memory, open_db_with_config, DbError};
use peopledb_core::StoreConfig;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "people");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO people (full_name, email) VALUES ('Ada', 'ada@example.com');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db_with_config(&StoreConfig::file(&path)).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM people;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_enforces_unique_email_and_non_blank_columns() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO people (full_name, email) VALUES ('Ada', 'ada@example.com');",
        [],
    )
    .unwrap();

    assert!(conn
        .execute(
            "INSERT INTO people (full_name, email) VALUES ('Other', 'ada@example.com');",
            [],
        )
        .is_err());
    assert!(conn
        .execute(
            "INSERT INTO people (full_name, email) VALUES ('Padded', '  ada@example.com ');",
            [],
        )
        .is_err());
    assert!(conn
        .execute(
            "INSERT INTO people (full_name, email) VALUES ('   ', 'blank@example.com');",
            [],
        )
        .is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
