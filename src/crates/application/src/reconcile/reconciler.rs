use crate::error::AppError;
use crate::projector::album_size::AlbumSizeCounter;
use crate::reconcile::detector::DriftDetector;
use crate::reconcile::drift::DriftObserver;
use crate::reconcile::observer::{DriftLogger, DriftSynchronizer};
use domain::value::{AlbumId, Owner};
use log::info;
use model::access::AlbumAccessResolver;
use model::album_size::{AlbumSizeDeleter, AlbumSizeReader, AlbumSizeWriter};
use model::catalog::{AlbumsByOwnerFinder, MediaCounter};
use std::sync::Arc;

/// OwnerDriftReconciler 重新计算一个 owner 的全部相册并检测视图差异
pub struct OwnerDriftReconciler {
    albums_by_owner: Arc<dyn AlbumsByOwnerFinder>,
    counter: AlbumSizeCounter,
    detector: DriftDetector,
    dry_run: bool,
}

impl OwnerDriftReconciler {
    /// Starts a dry-run reconciler: drifts are logged, the view is left untouched.
    pub fn builder(
        albums_by_owner: Arc<dyn AlbumsByOwnerFinder>,
        access_resolver: Arc<dyn AlbumAccessResolver>,
        media_counter: Arc<dyn MediaCounter>,
        album_size_reader: Arc<dyn AlbumSizeReader>,
    ) -> ReconcilerBuilder {
        ReconcilerBuilder {
            albums_by_owner,
            counter: AlbumSizeCounter::new(access_resolver, media_counter),
            album_size_reader,
            observer: None,
            synchronizing: false,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn reconcile(&self, owner: &Owner) -> Result<(), AppError> {
        let albums = self.albums_by_owner.find_albums_by_owner(owner).await?;
        let album_ids: Vec<AlbumId> = albums.into_iter().map(|album| album.id).collect();

        info!(
            "Reconciling albums view of {} ({} album(s), dry run: {})",
            owner,
            album_ids.len(),
            self.dry_run
        );
        self.counter.recount(&album_ids, &self.detector).await
    }

    /// Reconciles owners one after the other, stopping at the first failure.
    pub async fn reconcile_owners(&self, owners: &[Owner]) -> Result<(), AppError> {
        for owner in owners {
            self.reconcile(owner).await?;
        }
        Ok(())
    }
}

pub struct ReconcilerBuilder {
    albums_by_owner: Arc<dyn AlbumsByOwnerFinder>,
    counter: AlbumSizeCounter,
    album_size_reader: Arc<dyn AlbumSizeReader>,
    observer: Option<Arc<dyn DriftObserver>>,
    synchronizing: bool,
}

impl ReconcilerBuilder {
    /// Notifies a custom observer after the logger. Replaces a synchronizer set before.
    pub fn with_observer(mut self, observer: Arc<dyn DriftObserver>) -> Self {
        self.observer = Some(observer);
        self.synchronizing = false;
        self
    }

    /// Writes corrections back into the view. Replaces a custom observer set before.
    pub fn with_synchronizer(
        mut self,
        writer: Arc<dyn AlbumSizeWriter>,
        deleter: Arc<dyn AlbumSizeDeleter>,
    ) -> Self {
        self.observer = Some(Arc::new(DriftSynchronizer::new(writer, deleter)));
        self.synchronizing = true;
        self
    }

    pub fn build(self) -> OwnerDriftReconciler {
        let mut observers: Vec<Arc<dyn DriftObserver>> = vec![Arc::new(DriftLogger)];
        observers.extend(self.observer);

        OwnerDriftReconciler {
            albums_by_owner: self.albums_by_owner,
            counter: self.counter,
            detector: DriftDetector::new(self.album_size_reader, observers),
            dry_run: !self.synchronizing,
        }
    }
}
