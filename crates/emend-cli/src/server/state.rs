//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use emend::{EmendError, ReviewSession};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The review session being served. Single writer behind the lock.
    pub session: Arc<RwLock<ReviewSession>>,
    /// Path to the review file.
    pub review_path: PathBuf,
    /// Whether to save the review file on changes.
    pub auto_save: bool,
}

impl AppState {
    /// Create new application state.
    pub fn new(session: ReviewSession, review_path: PathBuf) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            review_path,
            auto_save: true,
        }
    }

    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    /// Save the current review layer to disk.
    pub async fn save(&self) -> Result<(), EmendError> {
        let session = self.session.read().await;
        match session.current_layer() {
            Some(layer) => layer.save(&self.review_path),
            None => Ok(()),
        }
    }
}
