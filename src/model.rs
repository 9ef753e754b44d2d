//! Response objects returned from the backend.

pub mod artist;
pub mod credentials;
pub mod error;
pub mod playlist;

use std::{fmt::Display, ops::Deref};

/// A plain text response body, displayed to the user as-is.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlainText(pub String);

impl PlainText {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for PlainText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for PlainText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PlainText> for String {
    fn from(text: PlainText) -> Self {
        text.0
    }
}
