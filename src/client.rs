//! Contains the [BackendClient](BackendClient) and its builder.
//!
//! # Usage
//!
//! ```no_run
//! # use mixtape::{client::BackendClientBuilder, session::{Session, UserId}, catalog::CatalogSelection};
//! # async fn foo() -> mixtape::Result<()> {
//! let client = BackendClientBuilder::new()
//!     // the default base URL points to the hosted backend
//!     .base_url("http://localhost:5000/")
//!     .build()?;
//!
//! let session = Session::new(UserId::new("U123")?);
//! let catalog = CatalogSelection::new("Master_Catalog.csv")?;
//!
//! let added = client.most_similar_song(&session, &catalog).send_async().await?;
//! println!("{added}");
//! # Ok(())
//! # }
//! ```

pub(crate) mod request_builder;

pub use self::request_builder::RequestBuilder;

use crate::{
    catalog::CatalogSelection,
    error::{Error, Result},
    model::{artist::AssociatedArtists, credentials::CredentialsResponse, playlist::PlaylistCreated, PlainText},
    selection::ArtistSelection,
    session::Session,
};

use log::debug;
use reqwest::{Client as AsyncClient, Method, Url};
use std::{fmt::Display, str::FromStr, sync::Arc, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://seamusmcn-github-io.onrender.com/";

const BASE_URL_ENV: &str = "MIXTAPE_BACKEND_URL";
const CREDENTIALS_FIELD_ENV: &str = "MIXTAPE_CREDENTIALS_FIELD";

// endpoints, relative to the base URL
const HOME_ENDPOINT: &str = "";
const PULL_TEXT_ENDPOINT: &str = "pull_text";
const SUBMIT_CREDENTIALS_ENDPOINT: &str = "submit_credentials";
const MOST_SIMILAR_SONG_ENDPOINT: &str = "most_similar_song";
const ARTIST_PLAYLIST_ENDPOINT: &str = "artist_playlist";

// form field names
const USER_ID_FIELD: &str = "user_id";
const CATALOG_FIELD: &str = "Catalog";
const INCLUDE_ARTISTS_FIELD: &str = "include_artists";

/// The form field the credentials value is submitted in. Backend revisions differ in which one they expect.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsField {
    #[default]
    ClientId,
    UserName,
}

/// An asynchronous client for the playlist backend. Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientRef>,
    http_client: AsyncClient,
}

#[derive(Debug)]
struct BackendClientRef {
    base_url: Url,
    credentials_field: CredentialsField,
}

#[derive(Debug, Clone, Default)]
pub struct BackendClientBuilder {
    base_url: Option<String>,
    credentials_field: CredentialsField,
    timeout: Option<Duration>,
}

impl CredentialsField {
    pub fn field_name(self) -> &'static str {
        match self {
            CredentialsField::ClientId => "client_id",
            CredentialsField::UserName => "user_name",
        }
    }
}

impl Display for CredentialsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for CredentialsField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client_id" => Ok(CredentialsField::ClientId),
            "user_name" => Ok(CredentialsField::UserName),
            other => Err(Error::UnknownCredentialsField(other.to_owned())),
        }
    }
}

impl BackendClient {
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn credentials_field(&self) -> CredentialsField {
        self.inner.credentials_field
    }

    /// Submit the user's credentials. A successful response contains either the URL the user should be sent to for
    /// authorization, or the reason the backend refused the credentials.
    pub fn submit_credentials<S>(&self, credentials: S) -> RequestBuilder<CredentialsResponse>
    where
        S: Into<String>,
    {
        RequestBuilder::new(Method::POST, SUBMIT_CREDENTIALS_ENDPOINT, self.clone())
            .form_field(self.inner.credentials_field.field_name(), credentials)
    }

    /// Queue the song from the given catalog most similar to what the user is currently playing. Returns the
    /// backend's human-readable confirmation.
    pub fn most_similar_song(&self, session: &Session, catalog: &CatalogSelection) -> RequestBuilder<PlainText, String> {
        RequestBuilder::new(Method::POST, MOST_SIMILAR_SONG_ENDPOINT, self.clone())
            .form_field(CATALOG_FIELD, catalog.as_str())
            .form_field(USER_ID_FIELD, session.user_id().as_str())
    }

    /// Get the artists associated with what the user is currently playing.
    pub fn associated_artists(&self, session: &Session) -> RequestBuilder<AssociatedArtists, Vec<String>> {
        RequestBuilder::new(Method::POST, ARTIST_PLAYLIST_ENDPOINT, self.clone())
            .form_field(USER_ID_FIELD, session.user_id().as_str())
    }

    /// Create a playlist from the selected artists. Each artist is sent in its own `include_artists` field, in
    /// selection order.
    pub fn create_artist_playlist(
        &self,
        session: &Session,
        selection: &ArtistSelection,
    ) -> RequestBuilder<PlaylistCreated> {
        selection.artists().iter().fold(
            RequestBuilder::new(Method::POST, ARTIST_PLAYLIST_ENDPOINT, self.clone())
                .form_field(USER_ID_FIELD, session.user_id().as_str()),
            |builder, artist| builder.form_field(INCLUDE_ARTISTS_FIELD, artist.as_str()),
        )
    }

    /// Get the text document the backend passes through from its repository.
    pub fn pull_text(&self) -> RequestBuilder<PlainText, String> {
        RequestBuilder::new(Method::GET, PULL_TEXT_ENDPOINT, self.clone())
    }

    /// Get the backend's greeting. Useful to check the backend is up; hosted instances may take a while to wake up.
    pub fn ping(&self) -> RequestBuilder<PlainText, String> {
        RequestBuilder::new(Method::GET, HOME_ENDPOINT, self.clone())
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(endpoint)
            .map_err(|e| Error::InvalidBaseUrl(format!("{}{endpoint}: {e}", self.inner.base_url)))
    }
}

impl BackendClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder configured from the `MIXTAPE_BACKEND_URL` and `MIXTAPE_CREDENTIALS_FIELD` environment
    /// variables. Unset variables leave the defaults in place.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            debug!("Using backend base URL from {BASE_URL_ENV}: {base_url}");
            builder = builder.base_url(base_url);
        }

        if let Ok(field) = std::env::var(CREDENTIALS_FIELD_ENV) {
            builder = builder.credentials_field(field.parse()?);
        }

        Ok(builder)
    }

    pub fn base_url<S>(self, base_url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            base_url: Some(base_url.into()),
            ..self
        }
    }

    pub fn credentials_field(self, credentials_field: CredentialsField) -> Self {
        Self {
            credentials_field,
            ..self
        }
    }

    /// Fail requests that take longer than the given duration. By default requests never time out.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn build(self) -> Result<BackendClient> {
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let mut http_client = AsyncClient::builder();
        if let Some(timeout) = self.timeout {
            http_client = http_client.timeout(timeout);
        }

        debug!(
            "Building backend client for {base_url} with credentials field {}",
            self.credentials_field
        );

        Ok(BackendClient {
            inner: Arc::new(BackendClientRef {
                base_url,
                credentials_field: self.credentials_field,
            }),
            http_client: http_client.build()?,
        })
    }
}

/// Parses the base URL, making sure it ends in a slash so endpoints are joined onto its path instead of replacing the
/// last segment.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl(base_url.to_owned()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
