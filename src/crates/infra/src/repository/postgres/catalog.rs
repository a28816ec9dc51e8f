use super::db_data::album::{self, Entity as AlbumEntity};
use super::db_data::media::{self, Entity as MediaEntity, MediaCountModel};
use super::map_db_error;
use async_trait::async_trait;
use domain::album::Album;
use domain::value::{AlbumId, Owner};
use model::catalog::{AlbumsByIdFinder, AlbumsByOwnerFinder, MediaCounter};
use model::ModelError;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::collections::HashMap;

/// 只读访问 catalog 服务维护的 album / media 表
#[derive(Clone)]
pub struct PostgresCatalog {
    db: DatabaseConnection,
}

impl PostgresCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn album_condition(ids: &[AlbumId]) -> Condition {
    ids.iter().fold(Condition::any(), |condition, id| {
        condition.add(
            Condition::all()
                .add(album::Column::Owner.eq(id.owner.as_str()))
                .add(album::Column::FolderName.eq(id.folder_name.as_str())),
        )
    })
}

fn media_condition(ids: &[AlbumId]) -> Condition {
    ids.iter().fold(Condition::any(), |condition, id| {
        condition.add(
            Condition::all()
                .add(media::Column::Owner.eq(id.owner.as_str()))
                .add(media::Column::FolderName.eq(id.folder_name.as_str())),
        )
    })
}

#[async_trait]
impl AlbumsByOwnerFinder for PostgresCatalog {
    async fn find_albums_by_owner(&self, owner: &Owner) -> Result<Vec<Album>, ModelError> {
        let rows = AlbumEntity::find()
            .filter(album::Column::Owner.eq(owner.as_str()))
            .order_by_asc(album::Column::FolderName)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Album::from).collect())
    }
}

#[async_trait]
impl AlbumsByIdFinder for PostgresCatalog {
    async fn find_albums_by_ids(&self, ids: &[AlbumId]) -> Result<Vec<Album>, ModelError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = AlbumEntity::find()
            .filter(album_condition(ids))
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Album::from).collect())
    }
}

#[async_trait]
impl MediaCounter for PostgresCatalog {
    async fn count_media(&self, ids: &[AlbumId]) -> Result<HashMap<AlbumId, i32>, ModelError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<MediaCountModel> = MediaEntity::find()
            .select_only()
            .column(media::Column::Owner)
            .column(media::Column::FolderName)
            .column_as(Expr::col(media::Column::Id).count(), "media_count")
            .filter(media_condition(ids))
            .group_by(media::Column::Owner)
            .group_by(media::Column::FolderName)
            .into_model::<MediaCountModel>()
            .all(&self.db)
            .await
            .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| {
                let count = i32::try_from(row.media_count).map_err(|_| {
                    ModelError::DbErr(format!(
                        "media count of {}/{} overflows: {}",
                        row.owner, row.folder_name, row.media_count
                    ))
                })?;
                Ok((AlbumId::new(row.owner, row.folder_name), count))
            })
            .collect()
    }
}
