pub mod album_size;
pub use album_size::InMemoryAlbumSizeRepository;
