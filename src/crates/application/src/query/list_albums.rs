use crate::query::dto::visible_album::{ListAlbumsFilter, VisibleAlbum};
use crate::query::media_counter::{MediaCountLookup, MediaCounterInjector, ProviderFactory};
use crate::query::owned_albums::OwnedAlbumsProvider;
use crate::query::shared_albums::SharedAlbumsProvider;
use crate::query::QueryError;
use async_trait::async_trait;
use domain::user::CurrentUser;
use model::access::{SharedAlbumsLister, SharingGridReader};
use model::album_size::AvailabilityReader;
use model::catalog::{AlbumsByIdFinder, AlbumsByOwnerFinder};
use std::sync::Arc;

/// A source of albums visible to a user.
#[async_trait]
pub trait VisibleAlbumProvider: Send + Sync {
    async fn list_albums(
        &self,
        user: &CurrentUser,
        filter: &ListAlbumsFilter,
    ) -> Result<Vec<VisibleAlbum>, QueryError>;
}

/// AlbumView merges the albums of every provider, most recent first.
#[derive(Clone)]
pub struct AlbumView {
    providers: Vec<Arc<dyn VisibleAlbumProvider>>,
}

impl AlbumView {
    pub fn new(providers: Vec<Arc<dyn VisibleAlbumProvider>>) -> Self {
        Self { providers }
    }

    /// Owned and shared albums behind a single snapshot of the albums view counts.
    pub fn with_media_counts(
        availability_reader: Arc<dyn AvailabilityReader>,
        albums_by_owner: Arc<dyn AlbumsByOwnerFinder>,
        sharing_grid: Arc<dyn SharingGridReader>,
        shared_albums: Arc<dyn SharedAlbumsLister>,
        albums_by_id: Arc<dyn AlbumsByIdFinder>,
    ) -> Self {
        let owned: ProviderFactory = Box::new(
            move |counts: Arc<MediaCountLookup>| -> Arc<dyn VisibleAlbumProvider> {
                Arc::new(OwnedAlbumsProvider::new(
                    albums_by_owner.clone(),
                    sharing_grid.clone(),
                    counts,
                ))
            },
        );
        let shared: ProviderFactory = Box::new(
            move |counts: Arc<MediaCountLookup>| -> Arc<dyn VisibleAlbumProvider> {
                Arc::new(SharedAlbumsProvider::new(
                    shared_albums.clone(),
                    albums_by_id.clone(),
                    counts,
                ))
            },
        );

        Self::new(vec![Arc::new(MediaCounterInjector::new(
            availability_reader,
            vec![owned, shared],
        ))])
    }

    pub async fn list_albums(
        &self,
        user: &CurrentUser,
        filter: &ListAlbumsFilter,
    ) -> Result<Vec<VisibleAlbum>, QueryError> {
        let mut albums = Vec::new();
        for provider in &self.providers {
            albums.extend(provider.list_albums(user, filter).await?);
        }

        albums.sort_by(|a, b| {
            b.album
                .start
                .cmp(&a.album.start)
                .then_with(|| b.album.end.cmp(&a.album.end))
        });
        Ok(albums)
    }
}
