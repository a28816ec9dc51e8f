pub mod access_scope;
pub mod album;
pub mod album_view;
pub mod media;
