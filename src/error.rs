use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("No free cell left on a {0}x{0} grid")]
    GridFull(i32),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid color: {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
