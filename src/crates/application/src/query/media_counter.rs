use crate::query::dto::visible_album::{ListAlbumsFilter, VisibleAlbum};
use crate::query::list_albums::VisibleAlbumProvider;
use crate::query::QueryError;
use async_trait::async_trait;
use domain::user::CurrentUser;
use domain::value::AlbumId;
use model::album_size::{AvailabilityReader, UserAlbumSize};
use std::collections::HashMap;
use std::sync::Arc;

/// Media counts of the albums a user sees, read once from the albums view.
#[derive(Debug, Clone, Default)]
pub struct MediaCountLookup {
    counts: HashMap<AlbumId, i32>,
}

impl MediaCountLookup {
    pub fn new(counts: HashMap<AlbumId, i32>) -> Self {
        Self { counts }
    }

    /// Albums absent from the view count zero medias.
    pub fn media_count(&self, album_id: &AlbumId) -> i32 {
        self.counts.get(album_id).copied().unwrap_or(0)
    }
}

impl From<Vec<UserAlbumSize>> for MediaCountLookup {
    fn from(sizes: Vec<UserAlbumSize>) -> Self {
        Self::new(
            sizes
                .into_iter()
                .map(|size| (size.album_size.album_id, size.album_size.media_count))
                .collect(),
        )
    }
}

/// Builds a provider around the counts snapshot of the current listing.
pub type ProviderFactory =
    Box<dyn Fn(Arc<MediaCountLookup>) -> Arc<dyn VisibleAlbumProvider> + Send + Sync>;

/// MediaCounterInjector 为每次列表请求加载一次计数快照，并注入到所有 provider
pub struct MediaCounterInjector {
    availability_reader: Arc<dyn AvailabilityReader>,
    factories: Vec<ProviderFactory>,
}

impl MediaCounterInjector {
    pub fn new(
        availability_reader: Arc<dyn AvailabilityReader>,
        factories: Vec<ProviderFactory>,
    ) -> Self {
        Self {
            availability_reader,
            factories,
        }
    }
}

#[async_trait]
impl VisibleAlbumProvider for MediaCounterInjector {
    async fn list_albums(
        &self,
        user: &CurrentUser,
        filter: &ListAlbumsFilter,
    ) -> Result<Vec<VisibleAlbum>, QueryError> {
        let sizes = self
            .availability_reader
            .get_availabilities_by_user(&user.user_id)
            .await?;
        let counts = Arc::new(MediaCountLookup::from(sizes));

        let mut albums = Vec::new();
        for factory in &self.factories {
            let provider = factory(counts.clone());
            albums.extend(provider.list_albums(user, filter).await?);
        }
        Ok(albums)
    }
}
