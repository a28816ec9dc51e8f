pub mod album_size;

pub mod registry;
pub use registry::register_handlers;
