//! End-to-end tests: CSV upload through question to formatted answer.

use pretty_assertions::assert_eq;
use talk2data::error::Talk2DataError;
use talk2data::llm::MockChatClient;
use talk2data::query::{QueryOrchestrator, DEFAULT_TABLE};
use talk2data::store::SqliteStore;

#[tokio::test]
async fn test_average_age_over_one_row() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("name,age\nAlice,30\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let llm = MockChatClient::new().with_response(
        "what is the average age?",
        "SELECT AVG(age) FROM data;",
    );
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let answer = orchestrator.ask("what is the average age?").await.unwrap();

    assert_eq!(answer.sql, "SELECT AVG(age) FROM data;");
    assert_eq!(answer.message, "💡 The result is: 30.0");
}

#[tokio::test]
async fn test_listing_answer_with_blank_line_between_rows() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv(
            "name,age,city\nAlice,30,Berlin\nBob,25,paris\n".as_bytes(),
            DEFAULT_TABLE,
        )
        .await
        .unwrap();

    let llm = MockChatClient::new()
        .with_response("everyone", "SELECT name, age FROM data;");
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let answer = orchestrator.ask("Show me everyone").await.unwrap();

    assert_eq!(answer.message, "• Alice | 30\n\n• Bob | 25");
}

#[tokio::test]
async fn test_case_insensitive_string_predicate() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv(
            "name,city\nAlice,Berlin\nBob,paris\nCarol,PARIS\n".as_bytes(),
            DEFAULT_TABLE,
        )
        .await
        .unwrap();

    // The generator is instructed to use LOWER() for string comparisons.
    let llm = MockChatClient::new().with_response(
        "paris",
        "SELECT name FROM data WHERE LOWER(city) = LOWER('Paris');",
    );
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let answer = orchestrator.ask("Who lives in Paris?").await.unwrap();

    assert_eq!(answer.message, "• Bob\n\n• Carol");
}

#[tokio::test]
async fn test_no_results_message() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("name,age\nAlice,30\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let llm = MockChatClient::new()
        .with_response("minors", "SELECT name FROM data WHERE age < 18;");
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let answer = orchestrator.ask("Are there any minors?").await.unwrap();

    assert_eq!(answer.message, "No results found.");
}

#[tokio::test]
async fn test_response_without_semicolon_is_terminal() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("name,age\nAlice,30\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let llm = MockChatClient::new()
        .with_response("average age", "SELECT AVG(age) FROM data");
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let err = orchestrator.ask("what is the average age?").await.unwrap_err();

    assert!(matches!(err, Talk2DataError::Extraction(_)));
}

#[tokio::test]
async fn test_prose_wrapped_response_still_answers() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .ingest_csv("name,age\nAlice,30\nBob,25\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let llm = MockChatClient::new().with_response(
        "youngest",
        "Here you go:\n```sql\nSELECT MIN(age) FROM data;\n```\nHope that helps!",
    );
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let answer = orchestrator.ask("How old is the youngest?").await.unwrap();

    assert_eq!(answer.sql, "SELECT MIN(age) FROM data;");
    assert_eq!(answer.message, "💡 The result is: 25");
}

#[tokio::test]
async fn test_ephemeral_store_session() {
    let store = SqliteStore::ephemeral().await.unwrap();
    store
        .ingest_csv("name,age\nAlice,30\nBob,25\n".as_bytes(), DEFAULT_TABLE)
        .await
        .unwrap();

    let llm = MockChatClient::new();
    let mut orchestrator = QueryOrchestrator::new(&llm, &store);

    let answer = orchestrator.ask("How many people are there?").await.unwrap();

    assert_eq!(answer.message, "💡 The result is: 2");
}
