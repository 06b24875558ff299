//! Command-line adapter: process arguments and environment in, one line of
//! output and an exit code out.

use std::io::Write;

use tracing::{debug, info};

use crate::core::{CompletionError, CompletionProvider, Prompt};
use crate::provider::OpenAiConfig;
use crate::provider::constants::openai;

/// Everything needed for one run, resolved before any network activity.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub prompt: Prompt,
    pub config: OpenAiConfig,
}

impl Invocation {
    /// Resolve the prompt and client settings.
    ///
    /// `words` are the positional arguments without the program name. `lookup`
    /// reads an environment variable; unset and empty values are treated alike.
    pub fn from_env<I, S, F>(program: &str, words: I, lookup: F) -> Result<Self, CompletionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let words: Vec<S> = words.into_iter().collect();
        if words.is_empty() {
            return Err(CompletionError::Configuration(format!(
                "usage: {program} <prompt words>"
            )));
        }
        let prompt = Prompt::from_words(words);

        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let api_key = var(openai::API_KEY_ENV_VAR).ok_or_else(|| {
            CompletionError::Configuration(format!(
                "required env var ${} is not set",
                openai::API_KEY_ENV_VAR
            ))
        })?;

        let mut config = OpenAiConfig::new(api_key);

        if let Some(base_url) = var(openai::BASE_URL_ENV_VAR) {
            debug!(%base_url, "using base url override");
            config = config.with_base_url(base_url);
        }

        if let Some(model) = var(openai::MODEL_ENV_VAR) {
            config = config.with_model(model);
        }

        if let Some(raw) = var(openai::TEMPERATURE_ENV_VAR) {
            let temperature = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or_else(|| {
                    CompletionError::Configuration(format!(
                        "invalid ${}: {raw:?} is not a number",
                        openai::TEMPERATURE_ENV_VAR
                    ))
                })?;
            config = config.with_temperature(temperature);
        }

        Ok(Self { prompt, config })
    }
}

/// Ask `provider` and write the reply, or the prefixed error, to `out`.
///
/// Returns the process exit code.
pub async fn run<P, W>(
    program: &str,
    provider: &P,
    prompt: &Prompt,
    out: &mut W,
) -> std::io::Result<u8>
where
    P: CompletionProvider + ?Sized,
    W: Write,
{
    info!(prompt_len = prompt.as_str().len(), "requesting completion");

    match provider.complete(prompt.as_str()).await {
        Ok(reply) => {
            writeln!(out, "{reply}")?;
            Ok(0)
        }
        Err(e) => {
            report(program, &e, out)?;
            Ok(e.exit_code())
        }
    }
}

/// Write `error` the way the command reports it. Configuration problems stand
/// alone; everything else is prefixed with the program name.
pub fn report<W: Write>(program: &str, error: &CompletionError, out: &mut W) -> std::io::Result<()> {
    if error.is_configuration() {
        writeln!(out, "{error}")
    } else {
        writeln!(out, "{program}: {error}")
    }
}
