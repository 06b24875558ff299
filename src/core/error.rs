use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    /// Missing prompt words, missing API key or an unusable override.
    #[error("{0}")]
    Configuration(String),

    #[error("marshalling body: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("doing request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("reading response body: {0}")]
    Io(#[source] reqwest::Error),

    #[error("unmarshalling response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The body decoded but held no choices. `raw` is the body as received.
    #[error("no choices returned:\n\n{}\n", String::from_utf8_lossy(raw))]
    NoChoices { raw: Bytes },
}

impl CompletionError {
    /// Process exit status for this error. Every failure is fatal.
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, CompletionError::Configuration(_))
    }
}
