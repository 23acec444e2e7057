//! Integration test modules.

mod end_to_end_test;
mod ingest_test;
mod store_test;
