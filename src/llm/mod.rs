//! Normalized chat types
//!
//! This module defines the single request/response shape that every provider
//! adapter translates to and from.

pub mod catalog;
pub mod request;
pub mod response;
pub mod types;

// Re-export key types for convenience
pub use request::{ChatRequest, ChatRequestBody, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use response::{ChatResponse, ChatResponseBody, Choice, ChoiceMessage, Usage};
pub use types::{ChatMessage, ProviderId, Role, UnknownProvider};
