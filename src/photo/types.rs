use serde::{Deserialize, Serialize};

pub type PhotoId = String;

/// Width of a print on the wall, in pixels.
pub const CARD_WIDTH: f64 = 200.0;

/// Viewports narrower than this use the mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            city: None,
            country: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Size of the browser viewport the print was captured in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// A single instant print.
///
/// `id` and `captured_at` never change after capture. `image_data` is replaced
/// wholesale by a style edit. Serialized with camelCase keys, which is the
/// format of both storage records and of remote gallery documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub image_data: String,
    /// Milliseconds since the Unix epoch.
    pub captured_at: i64,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub orientation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub caption_pending: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub development_progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Photo {
    pub fn is_developed(&self) -> bool {
        self.development_progress >= 100.0
    }

    /// Encoded size of the image payload in bytes.
    pub fn payload_len(&self) -> usize {
        self.image_data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_json_uses_camel_case() {
        let photo = Photo {
            id: "abc".to_string(),
            image_data: "data:image/jpeg;base64,AAAA".to_string(),
            captured_at: 1_700_000_000_000,
            position: Position::new(10.0, 20.0),
            orientation: -3.5,
            caption: Some("Nice!".to_string()),
            caption_pending: false,
            is_public: true,
            development_progress: 100.0,
            location: Some(Location::new(48.85, 2.35).with_city("Paris")),
        };

        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["imageData"], "data:image/jpeg;base64,AAAA");
        assert_eq!(json["capturedAt"], 1_700_000_000_000i64);
        assert_eq!(json["isPublic"], true);
        assert_eq!(json["developmentProgress"], 100.0);
        assert_eq!(json["location"]["city"], "Paris");
    }

    #[test]
    fn test_photo_tolerates_missing_optional_fields() {
        let json = r#"{"id":"p1","imageData":"x","capturedAt":5}"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        assert_eq!(photo.position, Position::default());
        assert!(!photo.is_public);
        assert!(photo.caption.is_none());
        assert_eq!(photo.development_progress, 0.0);
    }

    #[test]
    fn test_location_without_latitude_has_no_coordinates() {
        let location: Location = serde_json::from_str(r#"{"longitude": 2.0}"#).unwrap();
        assert!(!location.has_coordinates());
        assert!(Location::new(1.0, 2.0).has_coordinates());
    }

    #[test]
    fn test_viewport_layout() {
        assert!(Viewport::new(375.0, 812.0).is_mobile());
        assert!(!Viewport::new(1440.0, 900.0).is_mobile());
    }
}
