//! A client for the Mixtape backend, which builds Spotify playlists and queues songs based on what the user is
//! currently listening to.
//!
//! The crate has two layers:
//!
//! - [BackendClient](client::BackendClient) is a thin typed wrapper around the backend's HTTP endpoints.
//! - [Controller](controller::Controller) drives the user-facing flows on top of it: submitting credentials, handling
//!   the authorization callback, requesting the most similar song from a catalog and building a playlist from a
//!   selection of associated artists. It renders into an in-memory [Page](view::Page) so the flows can be driven and
//!   inspected without a browser.
//!
//! # Authorization
//!
//! The backend owns the Spotify OAuth flow. The client submits credentials, the backend answers with an authorization
//! URL, and after the user approves the application the backend redirects to the page with `auth_success=true` and a
//! `user_id` in the query. That user ID is the only state this crate persists; see [session].
//!
//! ```no_run
//! # use mixtape::prelude::*;
//! # async fn foo() -> mixtape::Result<()> {
//! let client = BackendClientBuilder::from_env()?.build()?;
//! let mut controller = Controller::new(client, MemorySessionStore::new());
//!
//! controller.submit_credentials("my Spotify client ID").await?;
//!
//! if let Some(auth_url) = controller.page().location() {
//!     println!("Authorize the application at {auth_url}");
//! }
//!
//! // ... once the user has been redirected back
//! controller.handle_auth_callback("https://example.github.io/?auth_success=true&user_id=U123")?;
//!
//! let artists = controller.open_artist_selection("artist-playlist-button").await?;
//! if let Some(first) = artists.first() {
//!     controller.check_artist(first, true)?;
//! }
//!
//! controller.set_additional_artists("Bonobo, Four Tet")?;
//! let created = controller.confirm_artist_selection().await?;
//! println!("{}", created.message);
//! # Ok(())
//! # }
//! ```

mod error;

pub mod callback;
pub mod catalog;
pub mod client;
pub mod controller;
pub mod model;
pub mod selection;
pub mod session;
pub mod view;

pub use crate::error::{Error, Result};

pub mod prelude {
    //! Re-exports of the commonly used types.

    pub use crate::{
        catalog::{CatalogInput, CatalogSelection},
        client::{BackendClient, BackendClientBuilder, CredentialsField},
        controller::{Controller, WorkflowState},
        model::credentials::CredentialsOutcome,
        selection::ArtistSelection,
        session::{FileSessionStore, MemorySessionStore, Session, SessionStore, UserId},
        view::Page,
    };
}
