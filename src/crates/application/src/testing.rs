//! Hand-written port stand-ins shared by the unit tests of this crate.

use crate::error::AppError;
use crate::query::dto::visible_album::{ListAlbumsFilter, VisibleAlbum};
use crate::query::list_albums::VisibleAlbumProvider;
use crate::query::QueryError;
use crate::reconcile::drift::{Drift, DriftObserver};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use domain::album::Album;
use domain::user::CurrentUser;
use domain::value::{AlbumId, Availability, Owner, UserId};
use model::access::{AlbumAccessResolver, SharedAlbumsLister, SharingGridReader};
use model::album_size::{
    AlbumSizeDeleter, AlbumSizeReader, AlbumSizeWriter, AvailabilityReader, MultiUserAlbumSize,
    UserAlbumSize,
};
use model::catalog::{AlbumsByIdFinder, AlbumsByOwnerFinder, MediaCounter};
use model::ModelError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn album_id(owner: &str, folder_name: &str) -> AlbumId {
    AlbumId::new(owner, folder_name)
}

fn day(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn album(id: AlbumId, start: &str, end: &str) -> Album {
    let name = id.folder_name.clone();
    Album::new(id, name, day(start), day(end))
}

#[derive(Default)]
pub struct StubAccessResolver {
    access: HashMap<AlbumId, Vec<Availability>>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubAccessResolver {
    pub fn with(access: Vec<(AlbumId, Vec<Availability>)>) -> Self {
        Self {
            access: access.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlbumAccessResolver for StubAccessResolver {
    async fn list_users_who_can_access_album(
        &self,
        ids: &[AlbumId],
    ) -> Result<HashMap<AlbumId, Vec<Availability>>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ModelError::DbErr("access control unavailable".to_string()));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.access.get(id).map(|users| (id.clone(), users.clone())))
            .collect())
    }
}

#[derive(Default)]
pub struct StubMediaCounter {
    counts: HashMap<AlbumId, i32>,
    calls: AtomicUsize,
}

impl StubMediaCounter {
    pub fn with(counts: Vec<(AlbumId, i32)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaCounter for StubMediaCounter {
    async fn count_media(&self, ids: &[AlbumId]) -> Result<HashMap<AlbumId, i32>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ids
            .iter()
            .filter_map(|id| self.counts.get(id).map(|count| (id.clone(), *count)))
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingAlbumSizeWriter {
    batches: Mutex<Vec<Vec<MultiUserAlbumSize>>>,
}

impl RecordingAlbumSizeWriter {
    pub fn batches(&self) -> Vec<Vec<MultiUserAlbumSize>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlbumSizeWriter for RecordingAlbumSizeWriter {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), ModelError> {
        self.batches.lock().unwrap().push(sizes);
        Ok(())
    }
}

/// Catalog and access-control answers for the listing providers.
#[derive(Default)]
pub struct StubCatalog {
    albums: Vec<Album>,
    grid: HashMap<AlbumId, Vec<UserId>>,
    shares: Vec<AlbumId>,
    calls: AtomicUsize,
}

impl StubCatalog {
    pub fn with_albums(mut self, albums: Vec<Album>) -> Self {
        self.albums = albums;
        self
    }

    pub fn with_grid(mut self, grid: HashMap<AlbumId, Vec<UserId>>) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_shares(mut self, shares: Vec<AlbumId>) -> Self {
        self.shares = shares;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlbumsByOwnerFinder for StubCatalog {
    async fn find_albums_by_owner(&self, owner: &Owner) -> Result<Vec<Album>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .albums
            .iter()
            .filter(|album| &album.id.owner == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AlbumsByIdFinder for StubCatalog {
    async fn find_albums_by_ids(&self, ids: &[AlbumId]) -> Result<Vec<Album>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .albums
            .iter()
            .filter(|album| ids.contains(&album.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SharingGridReader for StubCatalog {
    async fn get_album_sharing_grid(
        &self,
        owner: &Owner,
    ) -> Result<HashMap<AlbumId, Vec<UserId>>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .grid
            .iter()
            .filter(|(album_id, _)| &album_id.owner == owner)
            .map(|(album_id, users)| (album_id.clone(), users.clone()))
            .collect())
    }
}

#[async_trait]
impl SharedAlbumsLister for StubCatalog {
    async fn list_album_ids_shared_with_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<AlbumId>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.shares.clone())
    }
}

#[derive(Default)]
pub struct StubProvider {
    albums: Vec<VisibleAlbum>,
    fail: bool,
    filters: Mutex<Vec<ListAlbumsFilter>>,
}

impl StubProvider {
    pub fn returning(albums: Vec<VisibleAlbum>) -> Self {
        Self {
            albums,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn received_filters(&self) -> Vec<ListAlbumsFilter> {
        self.filters.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisibleAlbumProvider for StubProvider {
    async fn list_albums(
        &self,
        _user: &CurrentUser,
        filter: &ListAlbumsFilter,
    ) -> Result<Vec<VisibleAlbum>, QueryError> {
        self.filters.lock().unwrap().push(filter.clone());
        if self.fail {
            return Err(ModelError::DbErr("catalog unavailable".to_string()).into());
        }
        Ok(self.albums.clone())
    }
}

/// Albums view kept in a vector, recording every call made to it.
#[derive(Default)]
pub struct FakeAlbumSizeStore {
    rows: Mutex<Vec<UserAlbumSize>>,
    inserted: Mutex<Vec<Vec<MultiUserAlbumSize>>>,
    deleted: Mutex<Vec<(Availability, AlbumId)>>,
    availability_reads: AtomicUsize,
    album_size_reads: AtomicUsize,
}

impl FakeAlbumSizeStore {
    pub fn with(rows: Vec<UserAlbumSize>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<UserAlbumSize> {
        self.rows.lock().unwrap().clone()
    }

    pub fn inserted(&self) -> Vec<Vec<MultiUserAlbumSize>> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<(Availability, AlbumId)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn availability_reads(&self) -> usize {
        self.availability_reads.load(Ordering::SeqCst)
    }

    pub fn album_size_reads(&self) -> usize {
        self.album_size_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityReader for FakeAlbumSizeStore {
    async fn get_availabilities_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAlbumSize>, ModelError> {
        self.availability_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows()
            .into_iter()
            .filter(|row| &row.availability.user_id == user_id)
            .collect())
    }
}

#[async_trait]
impl AlbumSizeReader for FakeAlbumSizeStore {
    async fn get_album_sizes(
        &self,
        user_id: &UserId,
        owners: &[Owner],
    ) -> Result<Vec<UserAlbumSize>, ModelError> {
        self.album_size_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows()
            .into_iter()
            .filter(|row| {
                &row.availability.user_id == user_id
                    && owners.contains(&row.album_size.album_id.owner)
            })
            .collect())
    }
}

#[async_trait]
impl AlbumSizeWriter for FakeAlbumSizeStore {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), ModelError> {
        self.inserted.lock().unwrap().push(sizes.clone());

        let mut rows = self.rows.lock().unwrap();
        for size in sizes.iter().flat_map(|size| size.to_user_album_sizes()) {
            let existing = rows.iter().position(|row| {
                row.availability.user_id == size.availability.user_id
                    && row.album_size.album_id == size.album_size.album_id
            });
            match existing {
                Some(i) if rows[i].availability != size.availability => {
                    return Err(ModelError::InconsistentAvailability(
                        size.album_size.album_id.to_string(),
                    ))
                }
                Some(i) => rows[i].album_size.media_count = size.album_size.media_count,
                None => rows.push(size),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumSizeDeleter for FakeAlbumSizeStore {
    async fn delete_album_size(
        &self,
        availability: &Availability,
        album_id: &AlbumId,
    ) -> Result<(), ModelError> {
        self.deleted
            .lock()
            .unwrap()
            .push((availability.clone(), album_id.clone()));
        self.rows
            .lock()
            .unwrap()
            .retain(|row| !(&row.availability == availability && &row.album_size.album_id == album_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    received: Mutex<Vec<Vec<Drift>>>,
}

impl RecordingObserver {
    pub fn received(&self) -> Vec<Vec<Drift>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriftObserver for RecordingObserver {
    async fn on_detected_drifts(&self, drifts: &[Drift]) -> Result<(), AppError> {
        self.received.lock().unwrap().push(drifts.to_vec());
        Ok(())
    }
}

pub struct FailingObserver;

#[async_trait]
impl DriftObserver for FailingObserver {
    async fn on_detected_drifts(&self, _drifts: &[Drift]) -> Result<(), AppError> {
        Err(AppError::UnknownError("observer down".to_string()))
    }
}

/// Delegates to a shared store until `fail_from` corrections have been
/// attempted; that call and every later one fail.
pub struct BrokenAfterStore {
    inner: std::sync::Arc<FakeAlbumSizeStore>,
    fail_from: usize,
    calls: AtomicUsize,
}

impl BrokenAfterStore {
    pub fn new(inner: std::sync::Arc<FakeAlbumSizeStore>, fail_from: usize) -> Self {
        Self {
            inner,
            fail_from,
            calls: AtomicUsize::new(0),
        }
    }

    fn check(&self) -> Result<(), ModelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call >= self.fail_from {
            return Err(ModelError::DbErr("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumSizeWriter for BrokenAfterStore {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), ModelError> {
        self.check()?;
        self.inner.insert_album_size(sizes).await
    }
}

#[async_trait]
impl AlbumSizeDeleter for BrokenAfterStore {
    async fn delete_album_size(
        &self,
        availability: &Availability,
        album_id: &AlbumId,
    ) -> Result<(), ModelError> {
        self.check()?;
        self.inner.delete_album_size(availability, album_id).await
    }
}
