use crate::ai::{AiError, Captioner, Restyler};
use async_trait::async_trait;
use tracing::debug;

/// Stand-in used when no AI provider is configured.
pub struct NullAi;

impl NullAi {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullAi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Captioner for NullAi {
    async fn caption(&self, _image_data: &str) -> Result<String, AiError> {
        debug!("NULL AI PROVIDER - no caption");
        Err(AiError::NotConfigured)
    }

    fn name(&self) -> &str {
        "Null AI Provider (Disabled)"
    }
}

#[async_trait]
impl Restyler for NullAi {
    async fn restyle(&self, _image_data: &str, prompt: &str) -> Result<Option<String>, AiError> {
        debug!("NULL AI PROVIDER - ignoring style prompt {:?}", prompt);
        Ok(None)
    }

    fn name(&self) -> &str {
        "Null AI Provider (Disabled)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_caption_is_not_configured() {
        let result = NullAi::new().caption("data:image/jpeg;base64,AAAA").await;
        assert!(matches!(result, Err(AiError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_null_restyle_has_nothing_to_offer() {
        let result = NullAi::new()
            .restyle("data:image/jpeg;base64,AAAA", "watercolor")
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
