use sea_orm::entity::prelude::*;

pub const OWNER_SCOPE: &str = "OWNER";
pub const ALBUM_VISITOR_SCOPE: &str = "ALBUM_VISITOR";

/// 访问授权表，由 ACL 服务维护。
/// OWNER 行的 folder_name 为空，表示用户管理该 owner 的全部相册
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_scope")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scope_type: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub folder_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
