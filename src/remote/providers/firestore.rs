use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::photo::Photo;
use crate::remote::{FirestoreConfig, GalleryBackend, RemoteError};

const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

/// Cloud Firestore over its REST API.
pub struct FirestoreBackend {
    documents_url: String,
    collection: String,
    api_key: String,
    http: reqwest::Client,
}

impl FirestoreBackend {
    pub fn new(config: &FirestoreConfig) -> Result<Self, RemoteError> {
        if config.project_id.trim().is_empty() {
            return Err(RemoteError::ConfigError("project_id is empty".to_string()));
        }
        if config.api_key.trim().is_empty() {
            return Err(RemoteError::ConfigError("api_key is empty".to_string()));
        }

        let endpoint = config
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/');

        Ok(Self {
            documents_url: format!(
                "{}/projects/{}/databases/(default)/documents",
                endpoint, config.project_id
            ),
            collection: config.collection.clone(),
            api_key: config.api_key.clone(),
            http: reqwest::Client::new(),
        })
    }

    fn run_query_body(&self, limit: usize) -> Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "orderBy": [{
                    "field": { "fieldPath": "capturedAt" },
                    "direction": "DESCENDING"
                }],
                "limit": limit,
            }
        })
    }
}

#[async_trait]
impl GalleryBackend for FirestoreBackend {
    async fn insert(&self, photo: &Photo) -> Result<String, RemoteError> {
        let url = format!("{}/{}", self.documents_url, self.collection);
        let body = json!({ "fields": to_fields(&serde_json::to_value(photo)?) });

        debug!("Creating Firestore document for print {}", photo.id);
        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Firestore rejected print {}: {} {}", photo.id, status, text);
            return Err(RemoteError::ProviderError(format!("{}: {}", status, text)));
        }

        let created: Value = response.json().await?;
        document_id(&created)
            .ok_or_else(|| RemoteError::ProviderError("response has no document name".into()))
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<Photo>, RemoteError> {
        let url = format!("{}:runQuery", self.documents_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&self.run_query_body(limit))
            .send()
            .await?
            .error_for_status()?;

        let results: Value = response.json().await?;
        Ok(photos_from_query(&results))
    }

    fn name(&self) -> &str {
        "Cloud Firestore"
    }
}

/// Last path segment of a document's `name`.
fn document_id(document: &Value) -> Option<String> {
    document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Prints from a `runQuery` response. Entries without a document, or whose
/// fields do not describe a print, are skipped.
fn photos_from_query(results: &Value) -> Vec<Photo> {
    let Some(entries) = results.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("document"))
        .filter_map(|document| {
            let fields = document.get("fields")?.as_object()?;
            let value = from_fields(fields);
            match serde_json::from_value::<Photo>(value) {
                Ok(photo) => Some(photo),
                Err(e) => {
                    debug!("Skipping unreadable gallery document: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// JSON object -> Firestore `fields` map.
fn to_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_firestore_value(v)))
                .collect(),
        ),
        _ => Value::Object(Map::new()),
    }
}

fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(_) => json!({ "mapValue": { "fields": to_fields(value) } }),
    }
}

fn from_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), from_firestore_value(v)))
            .collect(),
    )
}

fn from_firestore_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" | "referenceValue" => {
            inner.clone()
        }
        "integerValue" => match inner {
            Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            other => other.clone(),
        },
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(from_firestore_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(from_fields)
            .unwrap_or_else(|| Value::Object(Map::new())),
        _ => Value::Null,
    }
}
