use super::db_data::album_view::{self, ActiveModel, Entity, Model};
use super::map_db_error;
use super::view_key;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use domain::value::{AlbumId, Availability, Owner, UserId};
use model::album_size::{
    AlbumSizeDeleter, AlbumSizeReader, AlbumSizeWriter, AvailabilityReader, MultiUserAlbumSize,
    UserAlbumSize,
};
use model::ModelError;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

/// 相册视图的 postgres 实现，行键见 [`view_key`]
#[derive(Clone)]
pub struct PostgresAlbumSizeRepository {
    db: DatabaseConnection,
}

impl PostgresAlbumSizeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_model(row: &UserAlbumSize, updated_at: NaiveDateTime) -> Model {
    let album_id = &row.album_size.album_id;
    let (pk, sk) = view_key::row_key(&row.availability, album_id);
    Model {
        pk,
        sk,
        album_owner: album_id.owner.to_string(),
        album_folder_name: album_id.folder_name.clone(),
        count: row.album_size.media_count,
        updated_at,
    }
}

// 相册取自 album_owner / album_folder_name 列，sort key 只提供身份类型
fn to_user_album_size(model: Model) -> Result<UserAlbumSize, ModelError> {
    let user_id = view_key::parse_partition_key(&model.pk);
    let as_owner = view_key::parse_kind(&model.sk);
    match (user_id, as_owner) {
        (Some(user_id), Some(as_owner)) => Ok(UserAlbumSize::new(
            AlbumId::new(model.album_owner, model.album_folder_name),
            model.count,
            Availability { user_id, as_owner },
        )),
        _ => Err(ModelError::DbErr(format!(
            "malformed albums view key: {} / {}",
            model.pk, model.sk
        ))),
    }
}

#[async_trait]
impl AvailabilityReader for PostgresAlbumSizeRepository {
    async fn get_availabilities_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAlbumSize>, ModelError> {
        let rows: Vec<Model> = Entity::find()
            .filter(album_view::Column::Pk.eq(view_key::partition_key(user_id)))
            .order_by_asc(album_view::Column::Sk)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(to_user_album_size).collect()
    }
}

#[async_trait]
impl AlbumSizeReader for PostgresAlbumSizeRepository {
    async fn get_album_sizes(
        &self,
        user_id: &UserId,
        owners: &[Owner],
    ) -> Result<Vec<UserAlbumSize>, ModelError> {
        if owners.is_empty() {
            return Ok(Vec::new());
        }

        let prefixes = owners
            .iter()
            .flat_map(view_key::owner_prefixes)
            .fold(Condition::any(), |condition, prefix| {
                condition.add(album_view::Column::Sk.starts_with(prefix.as_str()))
            });
        // LIKE 前缀不转义 % 和 _，再按 album_owner 列精确过滤
        let owner_names: Vec<&str> = owners.iter().map(Owner::as_str).collect();

        let rows: Vec<Model> = Entity::find()
            .filter(album_view::Column::Pk.eq(view_key::partition_key(user_id)))
            .filter(prefixes)
            .filter(album_view::Column::AlbumOwner.is_in(owner_names))
            .order_by_asc(album_view::Column::Sk)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(to_user_album_size).collect()
    }
}

#[async_trait]
impl AlbumSizeWriter for PostgresAlbumSizeRepository {
    async fn insert_album_size(&self, sizes: Vec<MultiUserAlbumSize>) -> Result<(), ModelError> {
        if let Some(size) = sizes.iter().find(|size| !size.album_size.album_id.is_valid()) {
            return Err(ModelError::InvalidInput(format!(
                "album id '{}' must have an owner without '#' and a folder name",
                size.album_size.album_id
            )));
        }
        let rows: Vec<UserAlbumSize> = sizes
            .iter()
            .flat_map(|size| size.to_user_album_sizes())
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await.map_err(map_db_error)?;
        let now = Utc::now().naive_utc();

        for row in rows {
            let model = to_model(&row, now);

            // 同一相册不能同时以 owner 和 visitor 身份出现
            let other_kind =
                view_key::sort_key(&row.album_size.album_id, !row.availability.as_owner);
            let conflicting = Entity::find_by_id((model.pk.clone(), other_kind))
                .one(&txn)
                .await
                .map_err(map_db_error)?;
            if conflicting.is_some() {
                // txn 未提交，drop 时回滚
                return Err(ModelError::InconsistentAvailability(format!(
                    "{} cannot be stored as {}: the other kind already exists",
                    row.album_size.album_id, row.availability
                )));
            }

            let active_model = ActiveModel {
                pk: Set(model.pk),
                sk: Set(model.sk),
                album_owner: Set(model.album_owner),
                album_folder_name: Set(model.album_folder_name),
                count: Set(model.count),
                updated_at: Set(model.updated_at),
            };
            Entity::insert(active_model)
                .on_conflict(
                    OnConflict::columns([album_view::Column::Pk, album_view::Column::Sk])
                        .update_columns([album_view::Column::Count, album_view::Column::UpdatedAt])
                        .to_owned(),
                )
                .exec(&txn)
                .await
                .map_err(map_db_error)?;
        }

        txn.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}

#[async_trait]
impl AlbumSizeDeleter for PostgresAlbumSizeRepository {
    async fn delete_album_size(
        &self,
        availability: &Availability,
        album_id: &AlbumId,
    ) -> Result<(), ModelError> {
        Entity::delete_by_id(view_key::row_key(availability, album_id))
            .exec(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
