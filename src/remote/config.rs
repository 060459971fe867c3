use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(flatten)]
    pub provider: RemoteProviderConfig,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default = "default_upload_max_dimension")]
    pub upload_max_dimension: u32,
    #[serde(default = "default_upload_quality")]
    pub upload_quality: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum RemoteProviderConfig {
    None,
    Memory,
    Firestore(FirestoreConfig),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Override for the REST endpoint, e.g. a local emulator.
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_fetch_limit() -> usize {
    50
}

fn default_upload_max_dimension() -> u32 {
    600
}

fn default_upload_quality() -> u8 {
    60
}

fn default_collection() -> String {
    "gallery".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            provider: RemoteProviderConfig::None,
            fetch_limit: default_fetch_limit(),
            upload_max_dimension: default_upload_max_dimension(),
            upload_quality: default_upload_quality(),
        }
    }
}
