pub mod config;
pub mod error;
pub mod providers;

pub use config::*;
pub use error::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Writes a short caption for a print.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn caption(&self, image_data: &str) -> Result<String, AiError>;
    fn name(&self) -> &str;
}

/// Produces a restyled copy of a print from a free-text prompt.
///
/// `Ok(None)` means the provider had no image to offer, which is not an error.
#[async_trait]
pub trait Restyler: Send + Sync {
    async fn restyle(&self, image_data: &str, prompt: &str) -> Result<Option<String>, AiError>;
    fn name(&self) -> &str;
}

pub type DynCaptioner = Arc<dyn Captioner>;
pub type DynRestyler = Arc<dyn Restyler>;

pub fn create_providers(config: &AiConfig) -> Result<(DynCaptioner, DynRestyler), AiError> {
    match config {
        AiConfig::None => {
            let provider = Arc::new(providers::null::NullAi::new());
            let captioner: DynCaptioner = provider.clone();
            let restyler: DynRestyler = provider;
            Ok((captioner, restyler))
        }
        AiConfig::Gemini(gemini_config) => {
            let provider = Arc::new(providers::gemini::GeminiProvider::new(gemini_config)?);
            let captioner: DynCaptioner = provider.clone();
            let restyler: DynRestyler = provider;
            Ok((captioner, restyler))
        }
    }
}
