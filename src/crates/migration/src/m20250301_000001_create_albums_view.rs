use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 每个 (用户, 相册) 一行: pk = USER#<user>#ALBUMS_VIEW, sk = <OWNED|VISITOR>#<owner>#<folder>#COUNT
        manager
            .create_table(
                Table::create()
                    .table(AlbumsView::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AlbumsView::Pk).string().not_null())
                    .col(ColumnDef::new(AlbumsView::Sk).string().not_null())
                    .col(ColumnDef::new(AlbumsView::AlbumOwner).string().not_null())
                    .col(
                        ColumnDef::new(AlbumsView::AlbumFolderName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AlbumsView::Count)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AlbumsView::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_albums_view")
                            .col(AlbumsView::Pk)
                            .col(AlbumsView::Sk),
                    )
                    .to_owned(),
            )
            .await?;

        // 按 owner 过滤同一用户的行
        manager
            .create_index(
                Index::create()
                    .name("idx_albums_view_pk_album_owner")
                    .table(AlbumsView::Table)
                    .col(AlbumsView::Pk)
                    .col(AlbumsView::AlbumOwner)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AlbumsView::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AlbumsView {
    Table,
    Pk,
    Sk,
    AlbumOwner,
    AlbumFolderName,
    Count,
    UpdatedAt,
}
