use crate::event::DomainEvent;
use crate::value::{AlbumId, MediaId, Owner};
use std::collections::HashMap;

/// Medias newly added to albums, grouped by the album they landed in.
#[derive(Debug, Clone, Default)]
pub struct MediasInserted {
    pub medias: HashMap<AlbumId, Vec<MediaId>>,
}

/// Medias moved between albums, grouped by their target album.
#[derive(Debug, Clone, Default)]
pub struct MediasTransferred {
    pub transfers: HashMap<AlbumId, Vec<MediaId>>,
}

#[derive(Debug, Clone)]
pub enum MediaEventKind {
    Inserted(MediasInserted),
    Transferred(MediasTransferred),
}

#[derive(Debug, Clone)]
pub struct MediaEvent {
    pub owner: Owner,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn inserted(owner: Owner, medias: HashMap<AlbumId, Vec<MediaId>>) -> Self {
        Self {
            owner,
            kind: MediaEventKind::Inserted(MediasInserted { medias }),
        }
    }

    pub fn transferred(owner: Owner, transfers: HashMap<AlbumId, Vec<MediaId>>) -> Self {
        Self {
            owner,
            kind: MediaEventKind::Transferred(MediasTransferred { transfers }),
        }
    }
}

impl DomainEvent for MediaEvent {
    fn aggregate_id(&self) -> String {
        self.owner.to_string()
    }
}
