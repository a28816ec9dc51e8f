pub mod access;
pub mod album_view;
pub mod catalog;
pub mod db_data;
pub mod view_key;

pub use access::PostgresAccessControl;
pub use album_view::PostgresAlbumSizeRepository;
pub use catalog::PostgresCatalog;

use model::ModelError;
use sea_orm::DbErr;

#[inline]
fn map_db_error(e: DbErr) -> ModelError {
    ModelError::DbErr(e.to_string())
}
