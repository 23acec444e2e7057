//! CSV ingestion integration tests.

use talk2data::error::Talk2DataError;
use talk2data::ingest::{ColumnType, Dataset};
use talk2data::query::DEFAULT_TABLE;
use talk2data::store::{SqliteStore, TabularStore, Value};

#[tokio::test]
async fn test_typed_ingestion_roundtrip() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv(
            "id,score,city\n1,9.5,Berlin\n2,7,Paris\n3,,Rome\n".as_bytes(),
            DEFAULT_TABLE,
        )
        .await
        .unwrap();

    let result = store
        .execute_query("SELECT id, score, city FROM data ORDER BY id")
        .await
        .unwrap();

    assert_eq!(result.row_count, 3);
    assert_eq!(
        result.rows[0],
        vec![Value::Int(1), Value::Float(9.5), Value::Text("Berlin".into())]
    );
    // Integer-looking cell in a REAL column loads as a float.
    assert_eq!(result.rows[1][1], Value::Float(7.0));
    // Empty cell loads as NULL.
    assert_eq!(result.rows[2][1], Value::Null);
}

#[tokio::test]
async fn test_reingestion_replaces_table() {
    let store = SqliteStore::in_memory().await.unwrap();

    store
        .ingest_csv("a,b\n1,2\n3,4\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();
    store
        .ingest_csv("name\nAlice\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let columns = store.columns(DEFAULT_TABLE).await.unwrap();
    assert_eq!(columns, vec!["name"]);

    let result = store.execute_query("SELECT name FROM data").await.unwrap();
    assert_eq!(result.row_count, 1);
}

#[tokio::test]
async fn test_malformed_csv_is_ingestion_error() {
    let store = SqliteStore::in_memory().await.unwrap();

    let err = store
        .ingest_csv("a,b\n1,2,3\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap_err();

    assert!(matches!(err, Talk2DataError::Ingestion(_)));
}

#[test]
fn test_inference_over_mixed_columns() {
    let dataset = Dataset::from_csv_str("n,mixed\n1,2\n2,x\n").unwrap();

    assert_eq!(dataset.column_types[0], ColumnType::Integer);
    assert_eq!(dataset.column_types[1], ColumnType::Text);
    // Text columns keep the original cell text, digits included.
    assert_eq!(dataset.rows[0][1], Value::Text("2".into()));
}

#[tokio::test]
async fn test_aggregate_on_integer_column_is_real() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("age\n30\n25\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let result = store
        .execute_query("SELECT AVG(age) FROM data")
        .await
        .unwrap();

    assert_eq!(result.rows[0][0], Value::Float(27.5));
}
