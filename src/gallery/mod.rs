// Gallery module - reconciles shared prints into one world-map gallery
mod core;
mod merge;
mod seed;

pub use self::core::GalleryEngine;
pub use merge::merge_by_id;
pub use seed::seed_photos;
