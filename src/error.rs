use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Prompt error: {message}")]
    Prompt { message: String },
}

impl From<dialoguer::Error> for GalleryError {
    fn from(error: dialoguer::Error) -> Self {
        GalleryError::Prompt {
            message: error.to_string(),
        }
    }
}

impl GalleryError {
    pub fn invalid_argument<S: Into<String>>(field: &'static str, message: S) -> Self {
        GalleryError::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}
