use crate::event::event_bus::{EventEnvelope, Handler};
use crate::projector::album_size::AlbumSizeProjector;
use domain::media::{MediaEvent, MediaEventKind};
use log::error;

pub struct AlbumSizeHandler {
    album_size_projector: AlbumSizeProjector,
}

impl AlbumSizeHandler {
    pub fn new(album_size_projector: AlbumSizeProjector) -> Self {
        Self {
            album_size_projector,
        }
    }
}

#[async_trait::async_trait]
impl Handler<MediaEvent> for AlbumSizeHandler {
    async fn handle(&self, event_envelope: &EventEnvelope<MediaEvent>) {
        let result = match &event_envelope.payload.kind {
            MediaEventKind::Inserted(evt) => {
                self.album_size_projector
                    .on_medias_inserted(&evt.medias)
                    .await
            }
            MediaEventKind::Transferred(evt) => {
                self.album_size_projector
                    .on_transferred_medias(&evt.transfers)
                    .await
            }
        };

        if let Err(e) = result {
            error!(
                "Failed to refresh albums view of {} after media event: {}",
                event_envelope.aggregate_id, e
            );
        }
    }
}
