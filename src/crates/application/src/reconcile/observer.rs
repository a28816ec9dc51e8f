use crate::error::AppError;
use crate::reconcile::drift::{Drift, DriftObserver};
use async_trait::async_trait;
use log::{info, warn};
use model::album_size::{AlbumSizeDeleter, AlbumSizeWriter, MultiUserAlbumSize};
use std::sync::Arc;

pub const DRIFT_LOG_TARGET: &str = "albums_view::drift";

/// Writes one line per drift.
#[derive(Debug, Clone, Default)]
pub struct DriftLogger;

#[async_trait]
impl DriftObserver for DriftLogger {
    async fn on_detected_drifts(&self, drifts: &[Drift]) -> Result<(), AppError> {
        for drift in drifts {
            info!(target: DRIFT_LOG_TARGET, "{}", drift);
        }
        Ok(())
    }
}

/// DriftSynchronizer 将检测到的差异写回相册视图
///
/// Corrections are applied one drift at a time, in the order they were detected.
/// A failure leaves the corrections already made in place.
pub struct DriftSynchronizer {
    writer: Arc<dyn AlbumSizeWriter>,
    deleter: Arc<dyn AlbumSizeDeleter>,
}

impl DriftSynchronizer {
    pub fn new(writer: Arc<dyn AlbumSizeWriter>, deleter: Arc<dyn AlbumSizeDeleter>) -> Self {
        Self { writer, deleter }
    }
}

#[async_trait]
impl DriftObserver for DriftSynchronizer {
    async fn on_detected_drifts(&self, drifts: &[Drift]) -> Result<(), AppError> {
        for drift in drifts {
            let applied = match drift {
                Drift::Expected { album_size, .. } => {
                    self.writer
                        .insert_album_size(vec![MultiUserAlbumSize::from(album_size.clone())])
                        .await
                }
                Drift::NotExpected {
                    availability,
                    album_id,
                } => self.deleter.delete_album_size(availability, album_id).await,
            };

            if let Err(e) = applied {
                warn!("Failed to synchronise drift [{}]: {}", drift, e);
                return Err(e.into());
            }
        }

        info!("{} drift(s) synchronised into the albums view", drifts.len());
        Ok(())
    }
}
