//! State transitions for a single print.
//!
//! Everything here is a pure function from the current [`Photo`] and an event
//! to the next [`Photo`]. Timers, drag gestures and collaborator calls live in
//! the controller and feed their results through [`apply`].
//!
//! Caption and style-edit completions race on the same photo. The merge policy
//! is last-write-wins: each completion writes its own field and clears
//! `caption_pending`, so whichever lands last decides the pending flag.

use rand::Rng;

use super::types::{CARD_WIDTH, Location, Photo, PhotoId, Position, Viewport};

pub const MAX_PROGRESS: f64 = 100.0;

/// Rotation range for a fresh print, in degrees either side of upright.
pub const MAX_ORIENTATION_DEGREES: f64 = 6.0;

pub const PLACEHOLDER_CITY: &str = "Somewhere on Earth";

#[derive(Debug, Clone, PartialEq)]
pub enum PhotoEvent {
    Moved(Position),
    ProgressSet(f64),
    /// Adds to the progress held at the moment the event is applied.
    ProgressAdvanced(f64),
    /// Raises progress toward a target; never lowers it.
    ProgressRaisedTo(f64),
    CaptionResolved(Option<String>),
    StyleEditStarted,
    /// `None` means the restyler had nothing to offer; the image is kept.
    StyleEditResolved(Option<String>),
    /// Flips `is_public`. The placeholder is used only when going public
    /// without usable coordinates.
    ShareToggled { placeholder: Location },
}

/// Build a freshly captured print: undeveloped, uncaptioned, caption pending.
pub fn new_photo(
    id: PhotoId,
    image_data: String,
    captured_at: i64,
    viewport: Viewport,
    orientation: f64,
    location: Option<Location>,
) -> Photo {
    Photo {
        id,
        image_data,
        captured_at,
        position: initial_position(viewport),
        orientation,
        caption: None,
        caption_pending: true,
        is_public: false,
        development_progress: 0.0,
        location,
    }
}

/// Where a print lands when it is ejected from the camera.
pub fn initial_position(viewport: Viewport) -> Position {
    if viewport.is_mobile() {
        Position::new(
            (viewport.width - CARD_WIDTH) / 2.0,
            viewport.height * 0.12,
        )
    } else {
        Position::new(viewport.width / 2.0 + 160.0, viewport.height / 2.0 - 180.0)
    }
}

pub fn random_orientation<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(-MAX_ORIENTATION_DEGREES..=MAX_ORIENTATION_DEGREES)
}

/// A clearly fake location for prints shared without a geotag.
pub fn placeholder_location<R: Rng>(rng: &mut R) -> Location {
    Location::new(
        rng.random_range(-50.0..=60.0),
        rng.random_range(-170.0..=170.0),
    )
    .with_city(PLACEHOLDER_CITY)
}

/// Next development progress: never lower than `current`, never above 100.
pub fn advance_progress(current: f64, delta: f64) -> f64 {
    let current = current.clamp(0.0, MAX_PROGRESS);
    if !delta.is_finite() || delta <= 0.0 {
        return current;
    }
    (current + delta).min(MAX_PROGRESS)
}

pub fn apply(mut photo: Photo, event: PhotoEvent) -> Photo {
    match event {
        PhotoEvent::Moved(position) => {
            photo.position = position;
        }
        PhotoEvent::ProgressSet(progress) => {
            photo.development_progress = progress;
        }
        PhotoEvent::ProgressAdvanced(delta) => {
            photo.development_progress = advance_progress(photo.development_progress, delta);
        }
        PhotoEvent::ProgressRaisedTo(target) => {
            let current = photo.development_progress;
            photo.development_progress = advance_progress(current, target - current);
        }
        PhotoEvent::CaptionResolved(caption) => {
            photo.caption = caption.filter(|c| !c.trim().is_empty());
            photo.caption_pending = false;
        }
        PhotoEvent::StyleEditStarted => {
            photo.caption_pending = true;
        }
        PhotoEvent::StyleEditResolved(image_data) => {
            if let Some(image_data) = image_data {
                photo.image_data = image_data;
            }
            photo.caption_pending = false;
        }
        PhotoEvent::ShareToggled { placeholder } => {
            photo.is_public = !photo.is_public;
            if photo.is_public {
                let usable = photo
                    .location
                    .as_ref()
                    .is_some_and(Location::has_coordinates);
                if !usable {
                    photo.location = Some(placeholder);
                }
            }
        }
    }
    photo
}
