use crate::photo::Location;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Best-effort source of the ambient location, consulted once at startup.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_location(&self) -> Option<Location>;
    fn name(&self) -> &str;
}

pub type DynGeolocator = Arc<dyn Geolocator>;

/// No ambient location available.
pub struct NoLocation;

#[async_trait]
impl Geolocator for NoLocation {
    async fn current_location(&self) -> Option<Location> {
        None
    }

    fn name(&self) -> &str {
        "None"
    }
}

/// A location pinned in configuration.
pub struct FixedLocation {
    location: Location,
}

impl FixedLocation {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

#[async_trait]
impl Geolocator for FixedLocation {
    async fn current_location(&self) -> Option<Location> {
        Some(self.location.clone())
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl From<&LocationConfig> for Location {
    fn from(config: &LocationConfig) -> Self {
        Location {
            latitude: Some(config.latitude),
            longitude: Some(config.longitude),
            city: config.city.clone(),
            country: config.country.clone(),
        }
    }
}

pub fn create_geolocator(config: Option<&LocationConfig>) -> DynGeolocator {
    match config {
        Some(config) => Arc::new(FixedLocation::new(config.into())),
        None => Arc::new(NoLocation),
    }
}

/// Resolve the ambient location once, logging what was found.
pub async fn resolve_ambient_location(geolocator: &dyn Geolocator) -> Option<Location> {
    let location = geolocator.current_location().await;
    match &location {
        Some(location) => info!(
            "Ambient location from {}: {:?}, {:?} ({})",
            geolocator.name(),
            location.latitude,
            location.longitude,
            location.city.as_deref().unwrap_or("unknown city")
        ),
        None => info!("No ambient location available"),
    }
    location
}
