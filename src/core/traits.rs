use async_trait::async_trait;

use super::error::CompletionError;

/// Something that turns a prompt into the model's reply text.
#[async_trait]
pub trait CompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
