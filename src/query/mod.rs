//! Query orchestration for talk2data.

mod orchestrator;

pub use orchestrator::{Answer, QueryOrchestrator, DEFAULT_TABLE};
