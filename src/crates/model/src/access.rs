//! Read ports over the access-control list: who owns, and who may visit, which album.

use crate::ModelError;
use async_trait::async_trait;
use domain::value::{AlbumId, Availability, Owner, UserId};
use std::collections::HashMap;

#[async_trait]
pub trait SharingGridReader: Send + Sync {
    /// Users each album of the owner is shared with. Albums shared with nobody may be absent.
    async fn get_album_sharing_grid(
        &self,
        owner: &Owner,
    ) -> Result<HashMap<AlbumId, Vec<UserId>>, ModelError>;
}

#[async_trait]
pub trait SharedAlbumsLister: Send + Sync {
    async fn list_album_ids_shared_with_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AlbumId>, ModelError>;
}

#[async_trait]
pub trait AlbumAccessResolver: Send + Sync {
    /// Owners and visitors of each album.
    async fn list_users_who_can_access_album(
        &self,
        ids: &[AlbumId],
    ) -> Result<HashMap<AlbumId, Vec<Availability>>, ModelError>;
}

#[async_trait]
impl<F> SharingGridReader for F
where
    F: Fn(&Owner) -> Result<HashMap<AlbumId, Vec<UserId>>, ModelError> + Send + Sync,
{
    async fn get_album_sharing_grid(
        &self,
        owner: &Owner,
    ) -> Result<HashMap<AlbumId, Vec<UserId>>, ModelError> {
        self(owner)
    }
}

#[async_trait]
impl<F> SharedAlbumsLister for F
where
    F: Fn(&UserId) -> Result<Vec<AlbumId>, ModelError> + Send + Sync,
{
    async fn list_album_ids_shared_with_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AlbumId>, ModelError> {
        self(user_id)
    }
}

#[async_trait]
impl<F> AlbumAccessResolver for F
where
    F: Fn(&[AlbumId]) -> Result<HashMap<AlbumId, Vec<Availability>>, ModelError> + Send + Sync,
{
    async fn list_users_who_can_access_album(
        &self,
        ids: &[AlbumId],
    ) -> Result<HashMap<AlbumId, Vec<Availability>>, ModelError> {
        self(ids)
    }
}
