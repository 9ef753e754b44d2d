use serde::Deserialize;

/// The confirmation the backend sends once a playlist has been created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistCreated {
    pub message: String,
}
