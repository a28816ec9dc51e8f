pub mod album;
pub mod event;
pub mod media;
pub mod user;
pub mod value;
