//! Assembly of the artist list sent when creating a playlist.

/// The artists a playlist is built from, in the order they are sent to the backend.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtistSelection {
    artists: Vec<String>,
}

impl ArtistSelection {
    /// Combines checked artists with the free-text list of additional artists. Checked artists come first in the order
    /// given, followed by the additional artists in the order they were typed. Duplicates are kept.
    pub fn new<I, S>(checked: I, additional: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut artists: Vec<String> = checked.into_iter().map(Into::into).collect();
        artists.extend(parse_additional_artists(additional));

        Self { artists }
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }
}

impl From<ArtistSelection> for Vec<String> {
    fn from(selection: ArtistSelection) -> Self {
        selection.artists
    }
}

/// Splits a comma-separated list of artist names, trimming each name and dropping empty ones.
pub fn parse_additional_artists(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
