use serde::{Deserialize, Deserializer, Serialize};

/// The text sent to the model, built from the words given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Join words with a single space. Individual words are kept as-is.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prompt = String::new();
        for (i, word) in words.into_iter().enumerate() {
            if i > 0 {
                prompt.push(' ');
            }
            prompt.push_str(word.as_ref());
        }
        Self(prompt)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
}

impl ChatRequest {
    /// A request carrying exactly one `user` message.
    pub fn user_prompt(model: impl Into<String>, prompt: &str, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message {
                role: ChatRole::User,
                content: prompt.to_string(),
            }],
            temperature,
        }
    }
}

// Every field defaults when absent or null so that error envelopes and
// sparse replies from compatible servers decode, and a response without
// choices is reported with its raw bytes.

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: Usage,
    #[serde(deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// Content of `choices[0].message`, if there is a first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Usage {
    #[serde(deserialize_with = "null_as_default")]
    pub prompt_tokens: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub completion_tokens: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_tokens: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Choice {
    #[serde(deserialize_with = "null_as_default")]
    pub message: ChoiceMessage,
    #[serde(deserialize_with = "null_as_default")]
    pub finish_reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChoiceMessage {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
