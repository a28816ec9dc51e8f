use crate::query::dto::visible_album::{ListAlbumsFilter, VisibleAlbum};
use crate::query::list_albums::VisibleAlbumProvider;
use crate::query::media_counter::MediaCountLookup;
use crate::query::QueryError;
use async_trait::async_trait;
use domain::user::CurrentUser;
use model::access::SharedAlbumsLister;
use model::catalog::AlbumsByIdFinder;
use std::sync::Arc;

/// Albums other owners shared with the current user.
pub struct SharedAlbumsProvider {
    shared_albums: Arc<dyn SharedAlbumsLister>,
    albums_by_id: Arc<dyn AlbumsByIdFinder>,
    counts: Arc<MediaCountLookup>,
}

impl SharedAlbumsProvider {
    pub fn new(
        shared_albums: Arc<dyn SharedAlbumsLister>,
        albums_by_id: Arc<dyn AlbumsByIdFinder>,
        counts: Arc<MediaCountLookup>,
    ) -> Self {
        Self {
            shared_albums,
            albums_by_id,
            counts,
        }
    }
}

#[async_trait]
impl VisibleAlbumProvider for SharedAlbumsProvider {
    async fn list_albums(
        &self,
        user: &CurrentUser,
        filter: &ListAlbumsFilter,
    ) -> Result<Vec<VisibleAlbum>, QueryError> {
        if filter.only_directly_owned {
            return Ok(Vec::new());
        }

        let album_ids = self
            .shared_albums
            .list_album_ids_shared_with_user(&user.user_id)
            .await?;
        if album_ids.is_empty() {
            return Ok(Vec::new());
        }

        let albums = self.albums_by_id.find_albums_by_ids(&album_ids).await?;
        Ok(albums
            .into_iter()
            .map(|album| VisibleAlbum {
                media_count: self.counts.media_count(&album.id),
                visitors: Vec::new(),
                owned_by_current_user: false,
                album,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{album, album_id, StubCatalog};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_only_directly_owned_skips_shares() {
        let malibu = album_id("pepper", "2024-malibu");
        let catalog = Arc::new(
            StubCatalog::default()
                .with_albums(vec![album(malibu.clone(), "2024-01-01", "2024-02-01")])
                .with_shares(vec![malibu]),
        );
        let provider = SharedAlbumsProvider::new(
            catalog.clone(),
            catalog.clone(),
            Arc::new(MediaCountLookup::default()),
        );

        let albums = provider
            .list_albums(
                &CurrentUser::new("tony", None),
                &ListAlbumsFilter {
                    only_directly_owned: true,
                },
            )
            .await
            .unwrap();

        assert!(albums.is_empty());
        assert_eq!(catalog.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_share_makes_no_catalog_lookup() {
        let catalog = Arc::new(StubCatalog::default());
        let provider = SharedAlbumsProvider::new(
            catalog.clone(),
            catalog.clone(),
            Arc::new(MediaCountLookup::default()),
        );

        let albums = provider
            .list_albums(&CurrentUser::new("tony", None), &ListAlbumsFilter::default())
            .await
            .unwrap();

        assert!(albums.is_empty());
        assert_eq!(catalog.calls(), 1);
    }

    #[tokio::test]
    async fn test_shared_albums_are_not_owned() {
        let malibu = album_id("pepper", "2024-malibu");
        let catalog = Arc::new(
            StubCatalog::default()
                .with_albums(vec![album(malibu.clone(), "2024-01-01", "2024-02-01")])
                .with_shares(vec![malibu.clone()]),
        );
        let counts = MediaCountLookup::new(HashMap::from([(malibu.clone(), 5)]));
        let provider = SharedAlbumsProvider::new(catalog.clone(), catalog, Arc::new(counts));

        let albums = provider
            .list_albums(&CurrentUser::new("tony", None), &ListAlbumsFilter::default())
            .await
            .unwrap();

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].album.id, malibu);
        assert_eq!(albums[0].media_count, 5);
        assert!(!albums[0].owned_by_current_user);
        assert!(albums[0].visitors.is_empty());
    }
}
