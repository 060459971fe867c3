use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum AiConfig {
    None,
    Gemini(GeminiConfig),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default = "default_caption_model")]
    pub caption_model: String,
    #[serde(default = "default_style_model")]
    pub style_model: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_caption_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_style_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig::None
    }
}
