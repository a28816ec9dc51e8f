use crate::query::dto::visible_album::{ListAlbumsFilter, VisibleAlbum};
use crate::query::list_albums::VisibleAlbumProvider;
use crate::query::media_counter::MediaCountLookup;
use crate::query::QueryError;
use async_trait::async_trait;
use domain::user::CurrentUser;
use model::access::SharingGridReader;
use model::catalog::AlbumsByOwnerFinder;
use std::sync::Arc;

/// Albums owned by the owner identity the current user manages.
pub struct OwnedAlbumsProvider {
    albums_by_owner: Arc<dyn AlbumsByOwnerFinder>,
    sharing_grid: Arc<dyn SharingGridReader>,
    counts: Arc<MediaCountLookup>,
}

impl OwnedAlbumsProvider {
    pub fn new(
        albums_by_owner: Arc<dyn AlbumsByOwnerFinder>,
        sharing_grid: Arc<dyn SharingGridReader>,
        counts: Arc<MediaCountLookup>,
    ) -> Self {
        Self {
            albums_by_owner,
            sharing_grid,
            counts,
        }
    }
}

#[async_trait]
impl VisibleAlbumProvider for OwnedAlbumsProvider {
    async fn list_albums(
        &self,
        user: &CurrentUser,
        _filter: &ListAlbumsFilter,
    ) -> Result<Vec<VisibleAlbum>, QueryError> {
        let Some(owner) = &user.owner else {
            return Ok(Vec::new());
        };

        let albums = self.albums_by_owner.find_albums_by_owner(owner).await?;
        let mut grid = self.sharing_grid.get_album_sharing_grid(owner).await?;

        Ok(albums
            .into_iter()
            .map(|album| VisibleAlbum {
                media_count: self.counts.media_count(&album.id),
                visitors: grid.remove(&album.id).unwrap_or_default(),
                owned_by_current_user: true,
                album,
            })
            .collect())
    }
}
