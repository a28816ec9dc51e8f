pub mod album_size;
