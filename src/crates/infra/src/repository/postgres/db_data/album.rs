use domain::album::Album;
use domain::value::AlbumId;
use sea_orm::entity::prelude::*;

/// 相册目录表，由 catalog 服务维护
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub folder_name: String,
    pub name: String,
    pub start_at: DateTime,
    pub end_at: DateTime,
    pub total_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Album {
    fn from(model: Model) -> Self {
        Self {
            id: AlbumId::new(model.owner, model.folder_name),
            name: model.name,
            start: model.start_at,
            end: model.end_at,
            total_count: model.total_count,
        }
    }
}
