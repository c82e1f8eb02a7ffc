use rusqlite::Connection;
use staffbook_core::db::migrations::latest_version;
use staffbook_core::{open_db, open_db_in_memory, open_store, DbError, Department, StoreTarget};
use staffbook_core::{Employee, Entity, Session};

#[test]
fn open_db_in_memory_creates_staff_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "departments");
    assert_table_exists(&conn, "employees");
    assert_table_exists(&conn, "reviews");
}

#[test]
fn reopening_file_store_keeps_rows_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staff.db");

    let id = {
        let conn = open_db(&path).unwrap();
        let mut session = Session::new(&conn);
        Department::create(&mut session, "Research", "Lyon")
            .unwrap()
            .id()
            .unwrap()
    };

    let conn = open_store(&StoreTarget::File(path)).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let mut session = Session::new(&conn);
    let loaded = Department::find_by_id(&mut session, id).unwrap().unwrap();
    assert_eq!(loaded.fields().name(), "Research");
}

#[test]
fn opening_store_with_newer_schema_version_fails() {
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
fn foreign_keys_are_not_enforced() {
    let conn = open_db_in_memory().unwrap();
    let enforced: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enforced, 0);

    let mut session = Session::new(&conn);
    let orphan = Employee::create(&mut session, "Orphan", "Clerk", Some(404)).unwrap();
    assert!(orphan.is_persisted());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
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
