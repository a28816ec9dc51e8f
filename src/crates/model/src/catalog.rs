//! Read ports over the authoritative catalog of albums and medias.

use crate::ModelError;
use async_trait::async_trait;
use domain::album::Album;
use domain::value::{AlbumId, Owner};
use std::collections::HashMap;

#[async_trait]
pub trait AlbumsByOwnerFinder: Send + Sync {
    async fn find_albums_by_owner(&self, owner: &Owner) -> Result<Vec<Album>, ModelError>;
}

#[async_trait]
pub trait AlbumsByIdFinder: Send + Sync {
    /// Albums that no longer exist are omitted from the result.
    async fn find_albums_by_ids(&self, ids: &[AlbumId]) -> Result<Vec<Album>, ModelError>;
}

#[async_trait]
pub trait MediaCounter: Send + Sync {
    /// Authoritative media count per album; albums without media may be absent.
    async fn count_media(&self, ids: &[AlbumId]) -> Result<HashMap<AlbumId, i32>, ModelError>;
}

#[async_trait]
impl<F> AlbumsByOwnerFinder for F
where
    F: Fn(&Owner) -> Result<Vec<Album>, ModelError> + Send + Sync,
{
    async fn find_albums_by_owner(&self, owner: &Owner) -> Result<Vec<Album>, ModelError> {
        self(owner)
    }
}

#[async_trait]
impl<F> AlbumsByIdFinder for F
where
    F: Fn(&[AlbumId]) -> Result<Vec<Album>, ModelError> + Send + Sync,
{
    async fn find_albums_by_ids(&self, ids: &[AlbumId]) -> Result<Vec<Album>, ModelError> {
        self(ids)
    }
}

#[async_trait]
impl<F> MediaCounter for F
where
    F: Fn(&[AlbumId]) -> Result<HashMap<AlbumId, i32>, ModelError> + Send + Sync,
{
    async fn count_media(&self, ids: &[AlbumId]) -> Result<HashMap<AlbumId, i32>, ModelError> {
        self(ids)
    }
}
