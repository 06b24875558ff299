pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::CompletionError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::CompletionProvider;
pub use types::{ChatRequest, ChatResponse, ChatRole, Choice, ChoiceMessage, Message, Prompt, Usage};
