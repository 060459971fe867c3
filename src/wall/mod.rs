// Wall module - owns the active collection of prints and their lifecycle
mod core;
mod development;
mod error;
mod events;
mod task;

pub use development::start_development_timer;
pub use error::WallError;
pub use events::WallEvent;
pub use task::EnrichmentTask;

use crate::DevelopmentConfig;
use crate::ai::{DynCaptioner, DynRestyler};
use crate::gallery::GalleryEngine;
use crate::photo::{Location, Photo};
use crate::remote::RemoteGalleryClient;
use crate::storage::PhotoStore;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, broadcast};

pub type SharedWall = Arc<PhotoWall>;

/// Result of a share toggle.
#[derive(Debug)]
pub struct ShareOutcome {
    pub photo: Photo,
    /// The fire-and-forget upload, present when the print went public.
    pub upload: Option<EnrichmentTask>,
    pub notification: Option<WallEvent>,
}

/// The in-memory source of truth for this session's prints.
///
/// Every mutation goes through a method here and is followed by a save of the
/// full collection through the [`PhotoStore`].
pub struct PhotoWall {
    pub(crate) photos: RwLock<Vec<Photo>>,
    pub(crate) store: PhotoStore,
    pub(crate) remote: RemoteGalleryClient,
    pub(crate) gallery: GalleryEngine,
    pub(crate) captioner: DynCaptioner,
    pub(crate) restyler: DynRestyler,
    pub(crate) development: DevelopmentConfig,
    pub(crate) ambient_location: RwLock<Option<Location>>,
    pub(crate) events: broadcast::Sender<WallEvent>,
    pub(crate) persist_lock: Mutex<()>,
}

impl PhotoWall {
    pub fn new(
        store: PhotoStore,
        gallery: GalleryEngine,
        captioner: DynCaptioner,
        restyler: DynRestyler,
        development: DevelopmentConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            photos: RwLock::new(Vec::new()),
            store,
            remote: gallery.remote().clone(),
            gallery,
            captioner,
            restyler,
            development,
            ambient_location: RwLock::new(None),
            events,
            persist_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WallEvent> {
        self.events.subscribe()
    }

    pub fn development(&self) -> &DevelopmentConfig {
        &self.development
    }

    pub async fn set_ambient_location(&self, location: Option<Location>) {
        *self.ambient_location.write().await = location;
    }

    pub async fn ambient_location(&self) -> Option<Location> {
        self.ambient_location.read().await.clone()
    }
}
