//! Store introspection and execution integration tests.

use talk2data::error::Talk2DataError;
use talk2data::query::DEFAULT_TABLE;
use talk2data::store::{SqliteStore, TabularStore};

#[tokio::test]
async fn test_columns_in_declared_order() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("age,city\n30,Berlin\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let columns = store.columns(DEFAULT_TABLE).await.unwrap();

    assert_eq!(columns, vec!["age".to_string(), "city".to_string()]);
}

#[tokio::test]
async fn test_columns_of_absent_table_is_not_found() {
    let store = SqliteStore::in_memory().await.unwrap();

    let err = store.columns("data").await.unwrap_err();

    assert!(matches!(err, Talk2DataError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_column_error_carries_engine_message() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("age\n30\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let err = store
        .execute_query("SELECT height FROM data")
        .await
        .unwrap_err();

    assert!(matches!(err, Talk2DataError::Execution(_)));
    assert!(err.to_string().to_lowercase().contains("height"));
}

#[tokio::test]
async fn test_close_is_idempotent_enough() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.close().await.unwrap();
    store.close().await.unwrap();
}

#[tokio::test]
async fn test_result_metadata() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("name,age\nAlice,30\nBob,25\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let result = store
        .execute_query("SELECT name, age FROM data")
        .await
        .unwrap();

    assert_eq!(result.row_count, 2);
    assert_eq!(result.columns.len(), 2);
    assert_eq!(result.columns[0].name, "name");
    assert_eq!(result.columns[1].name, "age");
}
