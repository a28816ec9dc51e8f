use super::db_data::access_scope::{self, Entity, Model, ALBUM_VISITOR_SCOPE, OWNER_SCOPE};
use super::map_db_error;
use async_trait::async_trait;
use domain::value::{AlbumId, Availability, Owner, UserId};
use itertools::Itertools;
use model::access::{AlbumAccessResolver, SharedAlbumsLister, SharingGridReader};
use model::ModelError;
use sea_orm::*;
use std::collections::HashMap;

/// 只读访问 ACL 服务维护的 access_scope 表
#[derive(Clone)]
pub struct PostgresAccessControl {
    db: DatabaseConnection,
}

impl PostgresAccessControl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_scopes(&self, condition: Condition) -> Result<Vec<Model>, ModelError> {
        Entity::find()
            .filter(condition)
            .order_by_asc(access_scope::Column::UserId)
            .all(&self.db)
            .await
            .map_err(map_db_error)
    }
}

fn album_id_of(scope: &Model) -> AlbumId {
    AlbumId::new(scope.owner.as_str(), scope.folder_name.as_str())
}

/// 合并 owner 与 visitor 授权，按请求的相册分组
///
/// Owners of the album's owner come first. A user who is both owner and visitor
/// is listed once as owner. Albums nobody can access are left out.
fn merge_access(
    ids: &[AlbumId],
    owners_by_owner: &HashMap<Owner, Vec<UserId>>,
    visitors_by_album: &HashMap<AlbumId, Vec<UserId>>,
) -> HashMap<AlbumId, Vec<Availability>> {
    let mut access = HashMap::new();
    for id in ids.iter().unique() {
        let album_owners = owners_by_owner.get(&id.owner).map(Vec::as_slice).unwrap_or_default();
        // 一个用户在同一相册上只有一种身份，owner 优先
        let visitors = visitors_by_album
            .get(id)
            .into_iter()
            .flatten()
            .filter(|user| !album_owners.contains(user))
            .cloned()
            .map(Availability::visitor);
        let users: Vec<Availability> = album_owners
            .iter()
            .cloned()
            .map(Availability::owner)
            .chain(visitors)
            .collect();
        if !users.is_empty() {
            access.insert(id.clone(), users);
        }
    }
    access
}

#[async_trait]
impl SharingGridReader for PostgresAccessControl {
    async fn get_album_sharing_grid(
        &self,
        owner: &Owner,
    ) -> Result<HashMap<AlbumId, Vec<UserId>>, ModelError> {
        let scopes = self
            .find_scopes(
                Condition::all()
                    .add(access_scope::Column::ScopeType.eq(ALBUM_VISITOR_SCOPE))
                    .add(access_scope::Column::Owner.eq(owner.as_str())),
            )
            .await?;

        Ok(scopes
            .into_iter()
            .map(|scope| (album_id_of(&scope), UserId::from(scope.user_id)))
            .into_group_map())
    }
}

#[async_trait]
impl SharedAlbumsLister for PostgresAccessControl {
    async fn list_album_ids_shared_with_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AlbumId>, ModelError> {
        let scopes = self
            .find_scopes(
                Condition::all()
                    .add(access_scope::Column::ScopeType.eq(ALBUM_VISITOR_SCOPE))
                    .add(access_scope::Column::UserId.eq(user_id.as_str())),
            )
            .await?;

        Ok(scopes.iter().map(album_id_of).sorted().dedup().collect())
    }
}

#[async_trait]
impl AlbumAccessResolver for PostgresAccessControl {
    async fn list_users_who_can_access_album(
        &self,
        ids: &[AlbumId],
    ) -> Result<HashMap<AlbumId, Vec<Availability>>, ModelError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let owners: Vec<&str> = ids.iter().map(|id| id.owner.as_str()).unique().collect();
        let owner_scopes = self
            .find_scopes(
                Condition::all()
                    .add(access_scope::Column::ScopeType.eq(OWNER_SCOPE))
                    .add(access_scope::Column::Owner.is_in(owners)),
            )
            .await?;

        let albums = ids.iter().fold(Condition::any(), |condition, id| {
            condition.add(
                Condition::all()
                    .add(access_scope::Column::Owner.eq(id.owner.as_str()))
                    .add(access_scope::Column::FolderName.eq(id.folder_name.as_str())),
            )
        });
        let visitor_scopes = self
            .find_scopes(
                Condition::all()
                    .add(access_scope::Column::ScopeType.eq(ALBUM_VISITOR_SCOPE))
                    .add(albums),
            )
            .await?;

        let owners_by_owner: HashMap<Owner, Vec<UserId>> = owner_scopes
            .into_iter()
            .map(|scope| (Owner::from(scope.owner), UserId::from(scope.user_id)))
            .into_group_map();
        let visitors_by_album: HashMap<AlbumId, Vec<UserId>> = visitor_scopes
            .into_iter()
            .map(|scope| (album_id_of(&scope), UserId::from(scope.user_id)))
            .into_group_map();

        Ok(merge_access(ids, &owners_by_owner, &visitors_by_album))
    }
}
