//! Proxy module
//!
//! Provider adapters and the dispatcher that selects between them.

pub mod anthropic;
pub mod dispatcher;
pub mod headers;
pub mod lmstudio;
pub mod logging;
pub mod mistral;
pub mod openai;
pub mod openai_compat;
pub mod provider;
pub mod upstream;

pub use anthropic::AnthropicAdapter;
pub use dispatcher::Dispatcher;
pub use lmstudio::LMStudioAdapter;
pub use mistral::MistralAdapter;
pub use openai::OpenAIAdapter;
pub use provider::{ChatAdapter, ProviderRegistry};
