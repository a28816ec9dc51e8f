use crate::ModelError;
use async_trait::async_trait;
use domain::value::{AlbumId, Availability, Owner, UserId};

/// Number of medias in an album, as computed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSize {
    pub album_id: AlbumId,
    pub media_count: i32,
}

/// One album size to be written for every listed user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiUserAlbumSize {
    pub album_size: AlbumSize,
    pub users: Vec<Availability>,
}

/// A row of the albums view: one per (album, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlbumSize {
    pub album_size: AlbumSize,
    pub availability: Availability,
}

impl AlbumSize {
    pub fn new(album_id: AlbumId, media_count: i32) -> Self {
        Self {
            album_id,
            media_count,
        }
    }
}

impl MultiUserAlbumSize {
    /// Fans the album size out to one row per user.
    pub fn to_user_album_sizes(&self) -> Vec<UserAlbumSize> {
        self.users
            .iter()
            .map(|availability| UserAlbumSize {
                album_size: self.album_size.clone(),
                availability: availability.clone(),
            })
            .collect()
    }
}

impl UserAlbumSize {
    pub fn new(album_id: AlbumId, media_count: i32, availability: Availability) -> Self {
        Self {
            album_size: AlbumSize::new(album_id, media_count),
            availability,
        }
    }
}

impl From<UserAlbumSize> for MultiUserAlbumSize {
    fn from(size: UserAlbumSize) -> Self {
        Self {
            album_size: size.album_size,
            users: vec![size.availability],
        }
    }
}

#[async_trait]
pub trait AvailabilityReader: Send + Sync {
    /// Every row the user has in the albums view.
    async fn get_availabilities_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAlbumSize>, ModelError>;
}

#[async_trait]
pub trait AlbumSizeReader: Send + Sync {
    /// Rows of the user restricted to albums of the given owners. No owner selects no row.
    async fn get_album_sizes(
        &self,
        user_id: &UserId,
        owners: &[Owner],
    ) -> Result<Vec<UserAlbumSize>, ModelError>;
}

#[async_trait]
pub trait AlbumSizeWriter: Send + Sync {
    /// Upserts every (album, user) row: the count is overwritten, the availability must not change.
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), ModelError>;
}

#[async_trait]
pub trait AlbumSizeDeleter: Send + Sync {
    async fn delete_album_size(
        &self,
        availability: &Availability,
        album_id: &AlbumId,
    ) -> Result<(), ModelError>;
}

/// Full albums view store.
pub trait AlbumSizeRepository:
    AvailabilityReader + AlbumSizeReader + AlbumSizeWriter + AlbumSizeDeleter
{
}

impl<T> AlbumSizeRepository for T where
    T: AvailabilityReader + AlbumSizeReader + AlbumSizeWriter + AlbumSizeDeleter
{
}
