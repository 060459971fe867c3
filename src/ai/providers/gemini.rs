use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::ai::{AiError, Captioner, GeminiConfig, Restyler};
use crate::compression::split_data_url;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const CAPTION_PROMPT: &str = "Write a short, playful caption for this instant photo, \
    at most eight words, as if handwritten on the white border. \
    Reply with the caption only.";

/// Captioning and restyling through the Gemini `generateContent` API.
pub struct GeminiProvider {
    endpoint: String,
    api_key: String,
    caption_model: String,
    style_model: String,
    http: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::ConfigError("api_key is empty".to_string()));
        }

        Ok(Self {
            endpoint: config
                .endpoint
                .as_deref()
                .unwrap_or(DEFAULT_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
            api_key: config.api_key.clone(),
            caption_model: config.caption_model.clone(),
            style_model: config.style_model.clone(),
            http: reqwest::Client::new(),
        })
    }

    async fn generate(&self, model: &str, body: &Value) -> Result<Value, AiError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Gemini {} request failed: {} {}", model, status, text);
            return Err(AiError::ProviderError(format!("{}: {}", status, text)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Captioner for GeminiProvider {
    async fn caption(&self, image_data: &str) -> Result<String, AiError> {
        let body = request_body(image_data, CAPTION_PROMPT)?;
        let response = self.generate(&self.caption_model, &body).await?;
        let caption = caption_from_response(&response)
            .ok_or_else(|| AiError::ProviderError("response has no text".to_string()))?;
        debug!("Gemini caption: {:?}", caption);
        Ok(caption)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

#[async_trait]
impl Restyler for GeminiProvider {
    async fn restyle(&self, image_data: &str, prompt: &str) -> Result<Option<String>, AiError> {
        let instruction = format!(
            "Restyle this instant photo: {}. Keep the composition and subjects recognisable.",
            prompt.trim()
        );
        let body = request_body(image_data, &instruction)?;
        let response = self.generate(&self.style_model, &body).await?;
        Ok(image_from_response(&response))
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

fn request_body(image_data: &str, text: &str) -> Result<Value, AiError> {
    let (mime, payload) = split_data_url(image_data)
        .ok_or_else(|| AiError::InvalidImage("expected a base64 data URL".to_string()))?;

    Ok(json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": mime, "data": payload } },
                { "text": text }
            ]
        }]
    }))
}

fn response_parts(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// First text part, stripped of surrounding whitespace and quotes.
fn caption_from_response(response: &Value) -> Option<String> {
    response_parts(response)
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .map(|text| text.trim().trim_matches('"').trim().to_string())
        .find(|text| !text.is_empty())
}

/// First inline image part, as a data URL.
fn image_from_response(response: &Value) -> Option<String> {
    response_parts(response).find_map(|part| {
        let inline = part.get("inlineData")?;
        let mime = inline.get("mimeType")?.as_str()?;
        let data = inline.get("data")?.as_str()?;
        (!data.is_empty()).then(|| format!("data:{};base64,{}", mime, data))
    })
}
