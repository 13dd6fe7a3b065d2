pub mod chat;
pub mod provider;
pub mod providers;

pub use chat::{ChatError, ChatGateway};
pub use provider::{LlmError, LlmProvider, Message, Role};
