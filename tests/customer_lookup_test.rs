//! Integration tests for the customer-name lookup cache.
//!
//! The list is computed once per process and never invalidated; staleness
//! after a table change is expected behavior, not a bug.

use sales_dashboard::db::{DataService, QueryExecutor};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::NamedTempFile;

const SEED_SQL: &str = r#"
CREATE TABLE Customer (
    CustomerID INTEGER PRIMARY KEY,
    FirstName TEXT,
    LastName TEXT,
    Address TEXT,
    City TEXT,
    CountryID INTEGER
);

INSERT INTO Customer VALUES (1, 'Grace', 'Hopper', '3 Low Rd', 'Galway', 1);
INSERT INTO Customer VALUES (2, 'Ada', 'Lovelace', '1 Main St', 'Dublin', 1);
INSERT INTO Customer VALUES (3, 'Miles', 'O''Brien', '2 High St', 'Cork', 1);
"#;

/// Create a seeded SQLite database and return its path.
async fn setup_db() -> String {
    let temp_file = NamedTempFile::new().unwrap();
    // Keep the temp file alive - prevent deletion when function returns
    let db_path = temp_file
        .into_temp_path()
        .keep()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::raw_sql(SEED_SQL).execute(&pool).await.unwrap();
    pool.close().await;

    db_path
}

#[tokio::test]
async fn test_names_are_distinct_and_sorted() {
    let db_path = setup_db().await;
    let data = DataService::connect(&db_path).await.unwrap();

    let names = data.customer_names().await.unwrap();
    assert_eq!(
        names,
        vec!["Ada Lovelace", "Grace Hopper", "Miles O'Brien"]
    );
}

#[tokio::test]
async fn test_lookup_is_memoized_across_table_changes() {
    let db_path = setup_db().await;
    let data = DataService::connect(&db_path).await.unwrap();
    let executor = QueryExecutor::new();

    let first = data.customer_names().await.unwrap();

    // Mutate the table between calls through the same handle
    executor
        .run_sql(
            data.pool(),
            "INSERT INTO Customer VALUES (4, 'Alan', 'Turing', '4 Park Ln', 'Dublin', 1)",
        )
        .await
        .unwrap();

    let second = data.customer_names().await.unwrap();
    assert_eq!(first, second);
    assert!(!second.contains(&"Alan Turing".to_string()));
}

#[tokio::test]
async fn test_fresh_service_sees_new_names() {
    // A process restart is the only invalidation trigger
    let db_path = setup_db().await;

    {
        let data = DataService::connect(&db_path).await.unwrap();
        let executor = QueryExecutor::new();
        data.customer_names().await.unwrap();
        executor
            .run_sql(
                data.pool(),
                "INSERT INTO Customer VALUES (4, 'Alan', 'Turing', '4 Park Ln', 'Dublin', 1)",
            )
            .await
            .unwrap();
        data.close().await;
    }

    let data = DataService::connect(&db_path).await.unwrap();
    let names = data.customer_names().await.unwrap();
    assert!(names.contains(&"Alan Turing".to_string()));
    assert_eq!(names.len(), 4);
}
