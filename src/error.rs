use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("No user is authenticated. The user should go through the authorization flow first")]
    NotAuthenticated,
    #[error("No catalog has been selected")]
    NoCatalogSelected,
    #[error("There is no artist selection panel in the document")]
    NoSelectionPanel,

    #[error("Invalid backend base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Unknown credentials field name {0:?}; expected \"client_id\" or \"user_name\"")]
    UnknownCredentialsField(String),
    #[error("Invalid user ID: {0:?}")]
    InvalidUserId(String),

    #[error("Backend responded with status {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Backend { status: u16, message: Option<String> },

    #[error("Failed to access the session store: {0}")]
    SessionStore(#[from] std::io::Error),
    #[error("Failed to (de)serialize the stored session: {0}")]
    SessionSerialization(#[from] serde_json::Error),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
}
