use r2d2_sqlite::SqliteConnectionManager;
use staffdb_core::db::migrations::latest_version;
use staffdb_core::{
    open_pool_in_memory, DbPool, Employee, EmployeeRepository, RepoError, SqliteEmployeeRepository,
};
use std::collections::HashSet;

#[test]
fn create_and_get_roundtrip() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    let employee = Employee::new(7, "Alice", "Engineer");
    repo.create_employee(&employee).unwrap();

    let loaded = repo.get_employee(7).unwrap().unwrap();
    assert_eq!(loaded.id, 7);
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.role, "Engineer");
}

#[test]
fn get_missing_employee_returns_none() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    assert!(repo.get_employee(404).unwrap().is_none());
}

#[test]
fn update_rewrites_name_and_role() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    repo.create_employee(&Employee::new(7, "Alice", "Engineer"))
        .unwrap();
    repo.update_employee(&Employee::new(7, "Alicia", "Manager"))
        .unwrap();

    let loaded = repo.get_employee(7).unwrap().unwrap();
    assert_eq!(loaded.id, 7);
    assert_eq!(loaded.name, "Alicia");
    assert_eq!(loaded.role, "Manager");
}

#[test]
fn update_missing_employee_returns_not_found() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    let err = repo
        .update_employee(&Employee::new(99, "Nobody", "Ghost"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn delete_removes_row() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    repo.create_employee(&Employee::new(7, "Alice", "Engineer"))
        .unwrap();
    repo.delete_employee(7).unwrap();

    assert!(repo.get_employee(7).unwrap().is_none());
}

#[test]
fn second_delete_reports_not_found_and_leaves_others_intact() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    repo.create_employee(&Employee::new(1, "Alice", "Engineer"))
        .unwrap();
    repo.create_employee(&Employee::new(2, "Bob", "Designer"))
        .unwrap();

    repo.delete_employee(1).unwrap();
    let err = repo.delete_employee(1).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(1)));

    let loaded = repo.get_employee(2).unwrap().unwrap();
    assert_eq!(loaded.name, "Bob");
}

#[test]
fn list_returns_every_stored_row() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    repo.create_employee(&Employee::new(1, "Alice", "Engineer"))
        .unwrap();
    repo.create_employee(&Employee::new(2, "Bob", "Designer"))
        .unwrap();
    repo.create_employee(&Employee::new(3, "Carol", "Analyst"))
        .unwrap();
    repo.delete_employee(2).unwrap();

    let ids: HashSet<_> = repo
        .list_employees()
        .unwrap()
        .into_iter()
        .map(|employee| employee.id)
        .collect();
    assert_eq!(ids, HashSet::from([1, 3]));
}

#[test]
fn list_on_empty_store_returns_empty_vec() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn null_text_columns_surface_db_errors_on_read() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool.clone()).unwrap();

    let conn = pool.get().unwrap();
    conn.execute(
        "INSERT INTO Employee (id, name, role) VALUES (?1, NULL, NULL);",
        rusqlite::params![1],
    )
    .unwrap();
    drop(conn);

    let get_err = repo.get_employee(1).unwrap_err();
    assert!(matches!(get_err, RepoError::Db(_)));

    let list_err = repo.list_employees().unwrap_err();
    assert!(matches!(list_err, RepoError::Db(_)));
}

#[test]
fn duplicate_id_create_fails_and_preserves_original() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    repo.create_employee(&Employee::new(5, "Alice", "Engineer"))
        .unwrap();
    let err = repo
        .create_employee(&Employee::new(5, "Bob", "Designer"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let loaded = repo.get_employee(5).unwrap().unwrap();
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.role, "Engineer");
}

#[test]
fn full_lifecycle_create_get_update_list_delete() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(pool).unwrap();

    let employee = Employee::new(42, "Alice", "Engineer");
    repo.create_employee(&employee).unwrap();

    let stored = repo.get_employee(42).unwrap().unwrap();
    assert_eq!(stored, employee);

    let promoted = Employee {
        role: "Manager".to_string(),
        ..stored
    };
    repo.update_employee(&promoted).unwrap();
    assert_eq!(repo.get_employee(42).unwrap().unwrap().role, "Manager");

    let all = repo.list_employees().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], promoted);

    repo.delete_employee(42).unwrap();
    assert!(repo.get_employee(42).unwrap().is_none());
}

#[test]
fn repository_rejects_unmigrated_database() {
    let pool = raw_memory_pool();

    let result = SqliteEmployeeRepository::try_new(pool);
    match result {
        Err(RepoError::UninitializedDatabase {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized database error"),
    }
}

#[test]
fn repository_rejects_database_without_employee_table() {
    let pool = raw_memory_pool();
    let conn = pool.get().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();
    drop(conn);

    let result = SqliteEmployeeRepository::try_new(pool);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("Employee"))
    ));
}

#[test]
fn repository_rejects_employee_table_missing_required_column() {
    let pool = raw_memory_pool();
    let conn = pool.get().unwrap();
    conn.execute_batch(
        "CREATE TABLE Employee (
            id INTEGER PRIMARY KEY,
            name TEXT
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();
    drop(conn);

    let result = SqliteEmployeeRepository::try_new(pool);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "Employee",
            column: "role"
        })
    ));
}

fn raw_memory_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory();
    r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
        .unwrap()
}
