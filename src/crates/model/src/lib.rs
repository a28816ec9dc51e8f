pub mod access;
pub mod album_size;
pub mod catalog;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A plain upsert tried to switch a user between owner and visitor on the same album.
    #[error("Inconsistent availability: {0}")]
    InconsistentAvailability(String),
    #[error("Database error: {0}")]
    DbErr(String),
}
