use crate::error::AppError;
use async_trait::async_trait;
use domain::value::{AlbumId, Availability};
use model::album_size::UserAlbumSize;
use std::fmt::{self, Display};

/// A difference between the albums view and what the catalog says it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// A row that should exist: absent from the view when `missing`, stored with another count otherwise.
    Expected {
        album_size: UserAlbumSize,
        missing: bool,
    },
    /// A stored row the user is no longer entitled to, at least not under this availability.
    NotExpected {
        availability: Availability,
        album_id: AlbumId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    Missing,
    Override,
    Unexpected,
}

impl Drift {
    pub fn missing(album_size: UserAlbumSize) -> Self {
        Drift::Expected {
            album_size,
            missing: true,
        }
    }

    pub fn overridden(album_size: UserAlbumSize) -> Self {
        Drift::Expected {
            album_size,
            missing: false,
        }
    }

    pub fn not_expected(availability: Availability, album_id: AlbumId) -> Self {
        Drift::NotExpected {
            availability,
            album_id,
        }
    }

    pub fn kind(&self) -> DriftKind {
        match self {
            Drift::Expected { missing: true, .. } => DriftKind::Missing,
            Drift::Expected { missing: false, .. } => DriftKind::Override,
            Drift::NotExpected { .. } => DriftKind::Unexpected,
        }
    }

    pub fn availability(&self) -> &Availability {
        match self {
            Drift::Expected { album_size, .. } => &album_size.availability,
            Drift::NotExpected { availability, .. } => availability,
        }
    }

    pub fn album_id(&self) -> &AlbumId {
        match self {
            Drift::Expected { album_size, .. } => &album_size.album_size.album_id,
            Drift::NotExpected { album_id, .. } => album_id,
        }
    }
}

impl Display for DriftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftKind::Missing => write!(f, "MISSING"),
            DriftKind::Override => write!(f, "OVERRIDE"),
            DriftKind::Unexpected => write!(f, "UNEXPECTED"),
        }
    }
}

impl Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::Expected { album_size, .. } => write!(
                f,
                "{} | {} | {} | {}",
                album_size.availability,
                album_size.album_size.album_id,
                self.kind(),
                album_size.album_size.media_count
            ),
            Drift::NotExpected {
                availability,
                album_id,
            } => write!(f, "{} | {} | {} | -", availability, album_id, self.kind()),
        }
    }
}

/// Receives the drifts found by one detection run, in registration order.
#[async_trait]
pub trait DriftObserver: Send + Sync {
    async fn on_detected_drifts(&self, drifts: &[Drift]) -> Result<(), AppError>;
}
