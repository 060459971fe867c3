use crate::photo::PhotoId;
use serde::Serialize;

pub const SHARED_MESSAGE: &str = "Pinned to the world map";

/// Transient notifications for the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WallEvent {
    /// A print went public; the front end offers a jump to the gallery view.
    #[serde(rename_all = "camelCase")]
    Shared {
        photo_id: PhotoId,
        message: String,
        gallery_path: String,
    },
}

impl WallEvent {
    pub fn shared(photo_id: impl Into<PhotoId>) -> Self {
        WallEvent::Shared {
            photo_id: photo_id.into(),
            message: SHARED_MESSAGE.to_string(),
            gallery_path: "/api/gallery".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_event_serializes_for_the_front_end() {
        let json = serde_json::to_value(WallEvent::shared("p1")).unwrap();
        assert_eq!(json["type"], "shared");
        assert_eq!(json["photoId"], "p1");
        assert_eq!(json["galleryPath"], "/api/gallery");
    }
}
