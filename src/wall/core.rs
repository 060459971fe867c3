use super::{EnrichmentTask, PhotoWall, ShareOutcome, WallError, WallEvent};
use crate::ai::AiError;
use crate::photo::transitions::{self, PhotoEvent};
use crate::photo::{Photo, Position, Viewport};
use std::sync::Arc;
use tracing::{debug, info, warn};

impl PhotoWall {
    /// Load the collection saved by a previous session.
    ///
    /// Enrichment calls from that session are gone, so pending flags are
    /// cleared.
    pub async fn restore(&self) -> usize {
        let mut restored = self.store.get_user_photos().await;
        for photo in &mut restored {
            photo.caption_pending = false;
        }

        let count = restored.len();
        *self.photos.write().await = restored;
        info!("Restored {} prints from {}", count, self.store.backend_name());
        count
    }

    pub async fn photos(&self) -> Vec<Photo> {
        self.photos.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Photo> {
        self.photos.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// Put a freshly taken print on the wall and start captioning it.
    ///
    /// The print is visible right away with its caption pending. The caption
    /// call settles in the background; a failure just leaves the caption
    /// empty.
    pub async fn capture(
        self: &Arc<Self>,
        image_data: String,
        viewport: Viewport,
    ) -> Result<(Photo, EnrichmentTask), WallError> {
        if image_data.trim().is_empty() {
            return Err(WallError::InvalidImage("image data is empty".to_string()));
        }
        if !(viewport.width.is_finite() && viewport.height.is_finite()) {
            return Err(WallError::InvalidInput("viewport must be finite".to_string()));
        }

        let orientation = transitions::random_orientation(&mut rand::rng());
        let photo = transitions::new_photo(
            uuid::Uuid::new_v4().to_string(),
            image_data,
            chrono::Utc::now().timestamp_millis(),
            viewport,
            orientation,
            self.ambient_location().await,
        );

        self.photos.write().await.push(photo.clone());
        debug!("Captured print {}", photo.id);
        self.persist().await;

        let wall = Arc::clone(self);
        let photo_id = photo.id.clone();
        let image_data = photo.image_data.clone();
        let handle = tokio::spawn(async move {
            let caption = match wall.captioner.caption(&image_data).await {
                Ok(caption) => Some(caption),
                Err(AiError::NotConfigured) => None,
                Err(e) => {
                    warn!("Captioning failed for print {}: {}", photo_id, e);
                    None
                }
            };
            wall.settle(&photo_id, PhotoEvent::CaptionResolved(caption))
                .await;
        });

        let task = EnrichmentTask::new(photo.id.clone(), handle);
        Ok((photo, task))
    }

    pub async fn update_position(&self, id: &str, x: f64, y: f64) -> Result<Photo, WallError> {
        self.mutate(id, PhotoEvent::Moved(Position::new(x, y))).await
    }

    /// Overwrite development progress. Callers keep it monotonic and clamped.
    pub async fn update_progress(&self, id: &str, progress: f64) -> Result<Photo, WallError> {
        self.mutate(id, PhotoEvent::ProgressSet(progress)).await
    }

    /// Raise development progress to `target`, clamped to 100.
    ///
    /// Applied against the progress held under the write lock, so a timer
    /// tick landing first is never undone.
    pub async fn raise_progress(&self, id: &str, target: f64) -> Result<Photo, WallError> {
        self.mutate(id, PhotoEvent::ProgressRaisedTo(target)).await
    }

    /// Shaking the print speeds up development.
    pub async fn shake(&self, id: &str) -> Result<Photo, WallError> {
        self.mutate(id, PhotoEvent::ProgressAdvanced(self.development.shake_boost))
            .await
    }

    /// Advance every undeveloped print by `delta`. Returns how many moved.
    pub async fn develop_tick(&self, delta: f64) -> usize {
        let changed = {
            let mut photos = self.photos.write().await;
            let mut changed = 0;
            for photo in photos.iter_mut().filter(|p| !p.is_developed()) {
                let before = photo.development_progress;
                *photo = transitions::apply(photo.clone(), PhotoEvent::ProgressAdvanced(delta));
                if photo.development_progress != before {
                    changed += 1;
                }
            }
            changed
        };

        if changed > 0 {
            self.persist().await;
        }
        changed
    }

    /// Remove a print from the wall. Copies already shared stay where they are.
    pub async fn delete(&self, id: &str) -> Result<(), WallError> {
        {
            let mut photos = self.photos.write().await;
            let before = photos.len();
            photos.retain(|p| p.id != id);
            if photos.len() == before {
                return Err(WallError::PhotoNotFound(id.to_string()));
            }
        }

        info!("Deleted print {}", id);
        self.persist().await;
        Ok(())
    }

    /// Restyle a print from a free-text prompt.
    ///
    /// The pending flag is raised while the call is in flight. Without a result
    /// the original image is kept. Two edits on the same print race and the
    /// last to settle wins.
    pub async fn edit_style(
        self: &Arc<Self>,
        id: &str,
        prompt: &str,
    ) -> Result<EnrichmentTask, WallError> {
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(WallError::InvalidInput("style prompt is empty".to_string()));
        }

        let photo = self.mutate(id, PhotoEvent::StyleEditStarted).await?;

        let wall = Arc::clone(self);
        let photo_id = photo.id.clone();
        let handle = tokio::spawn(async move {
            let restyled = match wall.restyler.restyle(&photo.image_data, &prompt).await {
                Ok(restyled) => restyled,
                Err(e) => {
                    warn!("Style edit failed for print {}: {}", photo_id, e);
                    None
                }
            };
            if restyled.is_none() {
                debug!("No restyled image for print {}, keeping original", photo_id);
            }
            wall.settle(&photo_id, PhotoEvent::StyleEditResolved(restyled))
                .await;
        });

        Ok(EnrichmentTask::new(id.to_string(), handle))
    }

    /// Flip a print between private and public.
    ///
    /// Going public guarantees a location (a placeholder if the print has no
    /// coordinates), starts an upload without waiting for it, and raises a
    /// notification. Going private retracts nothing.
    pub async fn toggle_share(self: &Arc<Self>, id: &str) -> Result<ShareOutcome, WallError> {
        let placeholder = transitions::placeholder_location(&mut rand::rng());
        let photo = self
            .mutate(id, PhotoEvent::ShareToggled { placeholder })
            .await?;

        if !photo.is_public {
            info!("Print {} is private again", photo.id);
            return Ok(ShareOutcome {
                photo,
                upload: None,
                notification: None,
            });
        }

        let wall = Arc::clone(self);
        let upload_photo = photo.clone();
        let handle = tokio::spawn(async move {
            // Failures are logged by the client; the toggle stands regardless.
            if let Ok(outcome) = wall.remote.upload_to_cloud(&upload_photo).await {
                debug!("Print {} shared: {:?}", upload_photo.id, outcome);
            }
        });

        let notification = WallEvent::shared(photo.id.clone());
        // No subscribers is fine.
        let _ = self.events.send(notification.clone());

        Ok(ShareOutcome {
            upload: Some(EnrichmentTask::new(photo.id.clone(), handle)),
            photo,
            notification: Some(notification),
        })
    }

    /// The world-map gallery, including this session's public prints.
    pub async fn global_gallery(&self) -> Vec<Photo> {
        let own = self.photos().await;
        self.gallery.get_global_gallery(&own).await
    }

    async fn mutate(&self, id: &str, event: PhotoEvent) -> Result<Photo, WallError> {
        let updated = {
            let mut photos = self.photos.write().await;
            let slot = photos
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| WallError::PhotoNotFound(id.to_string()))?;
            *slot = transitions::apply(slot.clone(), event);
            slot.clone()
        };

        self.persist().await;
        Ok(updated)
    }

    /// Apply a background completion; the print may have been deleted since.
    async fn settle(&self, id: &str, event: PhotoEvent) {
        if let Err(e) = self.mutate(id, event).await {
            debug!("Dropping completion: {}", e);
        }
    }

    /// Save the latest full snapshot. Saves are serialized so a stale
    /// snapshot never lands after a newer one.
    pub async fn persist(&self) {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.photos.read().await.clone();
        if self.store.save_user_photos(&snapshot).await.is_err() {
            debug!("Snapshot of {} prints not persisted", snapshot.len());
        }
    }
}
