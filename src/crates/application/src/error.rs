use model::ModelError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    ModelError(#[from] ModelError),

    #[error("Projection error: {0}")]
    ProjectionError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}
