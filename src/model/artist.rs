use serde::Deserialize;

/// Artists the backend associates with the user's current listening.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct AssociatedArtists {
    #[serde(default)]
    associated_artists: Vec<String>,
}

impl AssociatedArtists {
    pub fn names(&self) -> &[String] {
        &self.associated_artists
    }

    pub fn take_names(self) -> Vec<String> {
        self.associated_artists
    }

    pub fn is_empty(&self) -> bool {
        self.associated_artists.is_empty()
    }
}

impl From<AssociatedArtists> for Vec<String> {
    fn from(artists: AssociatedArtists) -> Self {
        artists.associated_artists
    }
}
