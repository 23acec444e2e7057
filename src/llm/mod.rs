//! Language-model integration for talk2data.
//!
//! Provides the chat-completion capability trait plus the Groq-backed
//! implementation, the SQL extractor, and prompt construction.

pub mod extract;
pub mod groq;
pub mod mock;
pub mod prompt;
pub mod types;

pub use extract::extract_sql;
pub use groq::{GroqClient, GroqConfig};
pub use mock::MockChatClient;
pub use prompt::{build_messages, build_system_prompt};
pub use types::{Message, Role};

use async_trait::async_trait;

use crate::error::Result;

/// Trait for chat clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async
/// operations.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generates a completion for the given messages.
    ///
    /// Returns the complete response as a single string.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}
