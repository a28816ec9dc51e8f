use async_trait::async_trait;
use dashmap::DashMap;
use domain::value::{AlbumId, Availability, Owner, UserId};
use model::album_size::{
    AlbumSizeDeleter, AlbumSizeReader, AlbumSizeWriter, AvailabilityReader, MultiUserAlbumSize,
    UserAlbumSize,
};
use model::ModelError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 内存中的相册视图，每个 (用户, 相册) 一行
#[derive(Clone, Default)]
pub struct InMemoryAlbumSizeRepository {
    store: Arc<DashMap<UserId, BTreeMap<AlbumId, UserAlbumSize>>>,
    write_lock: Arc<Mutex<()>>,
}

impl InMemoryAlbumSizeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn stored_availability(&self, user_id: &UserId, album_id: &AlbumId) -> Option<Availability> {
        let rows = self.store.get(user_id)?;
        let availability = rows.get(album_id).map(|row| row.availability.clone());
        availability
    }

    /// Every stored row, ordered by user then album.
    pub fn rows(&self) -> Vec<UserAlbumSize> {
        let mut rows: Vec<UserAlbumSize> = self
            .store
            .iter()
            .flat_map(|entry| entry.value().values().cloned().collect::<Vec<_>>())
            .collect();
        rows.sort_by(|a, b| {
            a.availability
                .user_id
                .cmp(&b.availability.user_id)
                .then_with(|| a.album_size.album_id.cmp(&b.album_size.album_id))
        });
        rows
    }
}

fn check_album_id(album_id: &AlbumId) -> Result<(), ModelError> {
    if album_id.is_valid() {
        Ok(())
    } else {
        Err(ModelError::InvalidInput(format!(
            "album id '{}' must have an owner without '#' and a folder name",
            album_id
        )))
    }
}

#[async_trait]
impl AvailabilityReader for InMemoryAlbumSizeRepository {
    async fn get_availabilities_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAlbumSize>, ModelError> {
        Ok(self
            .store
            .get(user_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl AlbumSizeReader for InMemoryAlbumSizeRepository {
    async fn get_album_sizes(
        &self,
        user_id: &UserId,
        owners: &[Owner],
    ) -> Result<Vec<UserAlbumSize>, ModelError> {
        Ok(self
            .store
            .get(user_id)
            .map(|rows| {
                rows.values()
                    .filter(|row| owners.contains(&row.album_size.album_id.owner))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl AlbumSizeWriter for InMemoryAlbumSizeRepository {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), ModelError> {
        for size in &sizes {
            check_album_id(&size.album_size.album_id)?;
        }
        let rows: Vec<UserAlbumSize> = sizes
            .iter()
            .flat_map(|size| size.to_user_album_sizes())
            .collect();

        let _guard = self.write_lock.lock().await;

        // 先整体校验，批次要么全部写入要么全部拒绝
        let mut planned: HashMap<(UserId, AlbumId), Availability> = HashMap::new();
        for row in &rows {
            let key = (
                row.availability.user_id.clone(),
                row.album_size.album_id.clone(),
            );
            let existing = match planned.get(&key) {
                Some(availability) => Some(availability.clone()),
                None => self.stored_availability(&key.0, &key.1),
            };
            if let Some(existing) = existing {
                if existing != row.availability {
                    return Err(ModelError::InconsistentAvailability(format!(
                        "{} is stored as {} and cannot be rewritten as {}",
                        key.1, existing, row.availability
                    )));
                }
            }
            planned.insert(key, row.availability.clone());
        }

        for row in rows {
            self.store
                .entry(row.availability.user_id.clone())
                .or_default()
                .insert(row.album_size.album_id.clone(), row);
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumSizeDeleter for InMemoryAlbumSizeRepository {
    async fn delete_album_size(
        &self,
        availability: &Availability,
        album_id: &AlbumId,
    ) -> Result<(), ModelError> {
        let _guard = self.write_lock.lock().await;
        if let Some(mut rows) = self.store.get_mut(&availability.user_id) {
            let matches = rows
                .get(album_id)
                .map(|row| &row.availability == availability)
                .unwrap_or(false);
            if matches {
                rows.remove(album_id);
            }
        }
        // RefMut 已释放，可以再锁分片
        self.store
            .remove_if(&availability.user_id, |_, rows| rows.is_empty());
        Ok(())
    }
}
