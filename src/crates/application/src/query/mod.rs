use model::ModelError;
use thiserror::Error;

pub mod dto;
pub mod list_albums;
pub mod media_counter;
pub mod owned_albums;
pub mod shared_albums;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Model error: {0}")]
    ModelError(#[from] ModelError),
}
