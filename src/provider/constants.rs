pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
    pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";
    pub const TEMPERATURE_ENV_VAR: &str = "OPENAI_TEMPERATURE";
}
