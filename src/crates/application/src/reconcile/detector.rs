use crate::error::AppError;
use crate::projector::album_size::AlbumSizeSink;
use crate::reconcile::drift::{Drift, DriftObserver};
use async_trait::async_trait;
use domain::value::{AlbumId, Owner, UserId};
use log::debug;
use model::album_size::{AlbumSizeReader, MultiUserAlbumSize, UserAlbumSize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// DriftDetector 将重新计算的相册大小与视图中已存储的行进行比较
pub struct DriftDetector {
    album_size_reader: Arc<dyn AlbumSizeReader>,
    observers: Vec<Arc<dyn DriftObserver>>,
}

impl DriftDetector {
    pub fn new(
        album_size_reader: Arc<dyn AlbumSizeReader>,
        observers: Vec<Arc<dyn DriftObserver>>,
    ) -> Self {
        Self {
            album_size_reader,
            observers,
        }
    }

    /// Diffs the expected sizes against the view, one read per expected user.
    ///
    /// Rows of a user are only compared for the owners present in `sizes`. A row
    /// stored under the other availability is reported as unexpected followed by
    /// the missing row, never as an override.
    pub async fn detect(&self, sizes: &[MultiUserAlbumSize]) -> Result<Vec<Drift>, AppError> {
        let mut expected: BTreeMap<UserId, BTreeMap<AlbumId, UserAlbumSize>> = BTreeMap::new();
        let mut owners: BTreeSet<Owner> = BTreeSet::new();

        for size in sizes {
            owners.insert(size.album_size.album_id.owner.clone());
            for user_size in size.to_user_album_sizes() {
                expected
                    .entry(user_size.availability.user_id.clone())
                    .or_default()
                    .insert(user_size.album_size.album_id.clone(), user_size);
            }
        }
        let owners: Vec<Owner> = owners.into_iter().collect();

        let mut drifts = Vec::new();
        for (user_id, expected_sizes) in &expected {
            let current_sizes = self
                .album_size_reader
                .get_album_sizes(user_id, &owners)
                .await?;

            let mut processed: HashSet<AlbumId> = HashSet::new();
            for current in current_sizes {
                let album_id = current.album_size.album_id;
                match expected_sizes.get(&album_id) {
                    None => drifts.push(Drift::not_expected(current.availability, album_id.clone())),
                    Some(wanted) if wanted.availability != current.availability => {
                        drifts.push(Drift::not_expected(current.availability, album_id.clone()));
                        drifts.push(Drift::missing(wanted.clone()));
                    }
                    Some(wanted)
                        if wanted.album_size.media_count != current.album_size.media_count =>
                    {
                        drifts.push(Drift::overridden(wanted.clone()));
                    }
                    Some(_) => {}
                }
                processed.insert(album_id);
            }

            drifts.extend(
                expected_sizes
                    .iter()
                    .filter(|(album_id, _)| !processed.contains(*album_id))
                    .map(|(_, wanted)| Drift::missing(wanted.clone())),
            );
        }

        debug!(
            "{} drift(s) found across {} user(s) of {} owner(s)",
            drifts.len(),
            expected.len(),
            owners.len()
        );
        Ok(drifts)
    }

    async fn notify(&self, drifts: &[Drift]) -> Result<(), AppError> {
        for observer in &self.observers {
            observer.on_detected_drifts(drifts).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumSizeSink for DriftDetector {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), AppError> {
        let drifts = self.detect(&sizes).await?;
        if drifts.is_empty() {
            return Ok(());
        }
        self.notify(&drifts).await
    }
}
