use thiserror::Error;

#[derive(Error, Debug)]
pub enum RackError {
    #[error("Grid size must be a positive whole number, got '{0}'")]
    InvalidGridSize(String),

    #[error("Width must be a positive number of pixels, got '{0}'")]
    InvalidWidth(String),

    #[error("A {0}x{0} grid is too large to draw as text")]
    TooLargeToDraw(u32),

    #[error("Shelf not found: {0}")]
    ShelfNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RackError>;
