use crate::error::AppError;
use async_trait::async_trait;
use domain::value::{AlbumId, MediaId};
use log::debug;
use model::access::AlbumAccessResolver;
use model::album_size::{AlbumSize, AlbumSizeWriter, MultiUserAlbumSize};
use model::catalog::MediaCounter;
use std::collections::HashMap;
use std::sync::Arc;

/// Destination of freshly computed album sizes: the albums view itself, or a drift detector.
#[async_trait]
pub trait AlbumSizeSink: Send + Sync {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), AppError>;
}

#[async_trait]
impl AlbumSizeSink for Arc<dyn AlbumSizeWriter> {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), AppError> {
        self.as_ref().insert_album_size(sizes).await?;
        Ok(())
    }
}

/// AlbumSizeCounter 从目录和权限数据重新计算相册大小
#[derive(Clone)]
pub struct AlbumSizeCounter {
    access_resolver: Arc<dyn AlbumAccessResolver>,
    media_counter: Arc<dyn MediaCounter>,
}

impl AlbumSizeCounter {
    pub fn new(
        access_resolver: Arc<dyn AlbumAccessResolver>,
        media_counter: Arc<dyn MediaCounter>,
    ) -> Self {
        Self {
            access_resolver,
            media_counter,
        }
    }

    /// Resolves users and counts of the albums with one bulk call to each port.
    /// Albums missing from either answer get no user or a zero count.
    pub async fn count(&self, album_ids: &[AlbumId]) -> Result<Vec<MultiUserAlbumSize>, AppError> {
        if album_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut users = self
            .access_resolver
            .list_users_who_can_access_album(album_ids)
            .await?;
        let counts = self.media_counter.count_media(album_ids).await?;

        Ok(album_ids
            .iter()
            .map(|album_id| MultiUserAlbumSize {
                album_size: AlbumSize::new(
                    album_id.clone(),
                    counts.get(album_id).copied().unwrap_or(0),
                ),
                users: users.remove(album_id).unwrap_or_default(),
            })
            .collect())
    }

    /// Recomputes the albums and hands them to the sink in a single call.
    pub async fn recount(
        &self,
        album_ids: &[AlbumId],
        sink: &dyn AlbumSizeSink,
    ) -> Result<(), AppError> {
        if album_ids.is_empty() {
            return Ok(());
        }

        let sizes = self.count(album_ids).await?;
        sink.insert_album_size(sizes).await
    }
}

/// AlbumSizeProjector 在媒体插入或转移后刷新受影响相册的视图行
pub struct AlbumSizeProjector {
    counter: AlbumSizeCounter,
    writer: Arc<dyn AlbumSizeWriter>,
}

impl AlbumSizeProjector {
    pub fn new(counter: AlbumSizeCounter, writer: Arc<dyn AlbumSizeWriter>) -> Self {
        Self { counter, writer }
    }

    /// 处理媒体转移事件
    pub async fn on_transferred_medias(
        &self,
        transfers: &HashMap<AlbumId, Vec<MediaId>>,
    ) -> Result<(), AppError> {
        self.refresh_album_sizes(affected_albums(transfers)).await
    }

    /// 处理媒体插入事件
    pub async fn on_medias_inserted(
        &self,
        medias: &HashMap<AlbumId, Vec<MediaId>>,
    ) -> Result<(), AppError> {
        self.refresh_album_sizes(affected_albums(medias)).await
    }

    async fn refresh_album_sizes(&self, album_ids: Vec<AlbumId>) -> Result<(), AppError> {
        if album_ids.is_empty() {
            return Ok(());
        }

        debug!("Refreshing albums view for {} album(s)", album_ids.len());
        self.counter.recount(&album_ids, &self.writer).await
    }
}

// Only the presence of an album matters, not which medias moved.
fn affected_albums(medias: &HashMap<AlbumId, Vec<MediaId>>) -> Vec<AlbumId> {
    let mut album_ids: Vec<AlbumId> = medias.keys().cloned().collect();
    album_ids.sort();
    album_ids
}
