use crate::photo::PhotoId;
use tokio::task::JoinHandle;
use tracing::warn;

/// Handle to an in-flight enrichment or upload for one print.
///
/// Dropping the handle detaches the task; it keeps running.
#[derive(Debug)]
pub struct EnrichmentTask {
    photo_id: PhotoId,
    handle: JoinHandle<()>,
}

impl EnrichmentTask {
    pub(crate) fn new(photo_id: PhotoId, handle: JoinHandle<()>) -> Self {
        Self { photo_id, handle }
    }

    pub fn photo_id(&self) -> &str {
        &self.photo_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task. A print whose enrichment is cancelled keeps its
    /// pending flag.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the task to settle.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await
            && !e.is_cancelled()
        {
            warn!("Task for print {} panicked: {}", self.photo_id, e);
        }
    }
}
