//! The client interaction controller.
//!
//! A [Controller] ties a [BackendClient], a [SessionStore] and a [Page] together. Each operation corresponds to a user
//! action: it checks its preconditions, talks to the backend and writes the outcome into the page's status line, its
//! location, or its elements. Every operation also returns its outcome so callers can react to it directly.
//!
//! # Artist selection
//!
//! Creating an artist playlist is a two-step workflow that moves through [WorkflowState]:
//!
//! ```text
//! Idle -> Loading -> Rendered -> Submitting -> Idle
//! ```
//!
//! [open_artist_selection](Controller::open_artist_selection) fetches the associated artists and renders the
//! selection panel right after the control that triggered it. The user's input is applied with
//! [check_artist](Controller::check_artist) and [set_additional_artists](Controller::set_additional_artists), and
//! [confirm_artist_selection](Controller::confirm_artist_selection) creates the playlist and removes the panel. Any
//! failure drops the panel and returns the workflow to [WorkflowState::Idle].

use crate::{
    callback::AuthCallback,
    catalog::CatalogInput,
    client::BackendClient,
    error::{Error, Result},
    model::{credentials::CredentialsOutcome, playlist::PlaylistCreated},
    selection::ArtistSelection,
    session::{MemorySessionStore, SessionStore, UserId},
    view::{self, Page, View, ADDITIONAL_ARTISTS_INPUT_ID, SELECTION_PANEL_ID},
};

use log::{debug, error, info, warn};

pub const AUTH_SUCCESS_MESSAGE: &str = "Authentication successful!";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Please authenticate first.";
pub const NO_CATALOG_MESSAGE: &str = "Please select a catalog type.";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from server.";
pub const SIGNED_OUT_MESSAGE: &str = "Signed out.";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Where the artist selection workflow is at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    /// Associated artists are being fetched.
    Loading,
    /// The selection panel is shown and waits for the user.
    Rendered,
    /// The playlist is being created.
    Submitting,
}

#[derive(Debug)]
pub struct Controller<S = MemorySessionStore>
where
    S: SessionStore,
{
    client: BackendClient,
    store: S,
    page: Page,
    workflow: WorkflowState,
}

/// The status line text for an error.
pub fn status_message(err: &Error) -> String {
    match err {
        Error::NotAuthenticated => NOT_AUTHENTICATED_MESSAGE.to_owned(),
        Error::NoCatalogSelected => NO_CATALOG_MESSAGE.to_owned(),
        Error::Backend { message, .. } => format!("An error occurred: {}", message.as_deref().unwrap_or(UNKNOWN_ERROR)),
        Error::HttpError(_) => format!("An error occurred: {UNKNOWN_ERROR}"),
        other => format!("An error occurred: {other}"),
    }
}

impl<S> Controller<S>
where
    S: SessionStore,
{
    pub fn new(client: BackendClient, store: S) -> Self {
        Self::with_page(client, store, Page::new())
    }

    pub fn with_page(client: BackendClient, store: S, page: Page) -> Self {
        Self {
            client,
            store,
            page,
            workflow: WorkflowState::Idle,
        }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow
    }

    pub fn into_parts(self) -> (BackendClient, S, Page) {
        (self.client, self.store, self.page)
    }

    /// Submits the credentials. On success the page navigates to the authorization URL the backend returned.
    pub async fn submit_credentials<C>(&mut self, credentials: C) -> Result<CredentialsOutcome>
    where
        C: Into<String>,
    {
        let result = self
            .client
            .submit_credentials(credentials)
            .send_async()
            .await
            .map(|response| response.outcome());

        match &result {
            Ok(CredentialsOutcome::Redirect(auth_url)) => {
                info!("Redirecting to authorization URL");
                debug!("Authorization URL: {auth_url}");

                self.page.clear_status();
                self.page.navigate(auth_url.as_str());
            }

            Ok(CredentialsOutcome::Rejected(reason)) => {
                warn!("Backend rejected the credentials: {reason}");
                self.page.set_status(format!("Error: {reason}"));
            }

            Ok(CredentialsOutcome::Unexpected) => {
                warn!("Credentials response had neither an authorization URL nor an error");
                self.page.set_status(UNEXPECTED_RESPONSE_MESSAGE);
            }

            Err(e) => self.show_error(e),
        }

        result
    }

    /// Inspects the page URL for a successful auth callback and stores the user ID it carries. Anything else leaves
    /// the stored session untouched.
    pub fn handle_auth_callback(&mut self, page_url: &str) -> Result<Option<UserId>> {
        match AuthCallback::parse(page_url) {
            AuthCallback::Authenticated(user_id) => {
                if let Err(e) = self.store.save(&user_id) {
                    self.show_error(&e);
                    return Err(e);
                }

                info!("Authenticated as {user_id}");
                self.page.set_status(AUTH_SUCCESS_MESSAGE);
                Ok(Some(user_id))
            }

            AuthCallback::NotAuthenticated { auth_success, user_id } => {
                info!("No successful auth callback in page URL (auth_success: {auth_success:?}, user_id: {user_id:?})");
                Ok(None)
            }
        }
    }

    /// Asks the backend to queue the song most similar to the current one from the selected catalog. The backend's
    /// reply is shown verbatim.
    pub async fn submit_catalog_request(&mut self, input: &CatalogInput) -> Result<String> {
        let result = self.catalog_request(input).await;

        match &result {
            Ok(reply) => self.page.set_status(reply.as_str()),
            Err(e) => self.show_error(e),
        }

        result
    }

    async fn catalog_request(&self, input: &CatalogInput) -> Result<String> {
        let session = self.store.session()?;
        let catalog = input.selection()?;

        debug!("Requesting most similar song from catalog {:?}", catalog.as_str());
        self.client.most_similar_song(&session, &catalog).send_async().await
    }

    /// Fetches the associated artists and renders the selection panel as the next sibling of `trigger`. Any panel
    /// already in the page is removed first.
    pub async fn open_artist_selection(&mut self, trigger: &str) -> Result<Vec<String>> {
        let session = match self.store.session() {
            Ok(session) => session,
            Err(e) => {
                self.show_error(&e);
                return Err(e);
            }
        };

        if self.page.remove(SELECTION_PANEL_ID).is_some() {
            debug!("Removed previous artist selection panel");
        }

        self.workflow = WorkflowState::Loading;

        let artists = match self.client.associated_artists(&session).send_async().await {
            Ok(artists) => artists,
            Err(e) => {
                self.abort_workflow(&e);
                return Err(e);
            }
        };

        debug!("Got {} associated artists", artists.len());
        let panel = view::artist_selection_panel(&artists);

        if self.page.position(trigger).is_some() {
            self.page.insert_after(trigger, SELECTION_PANEL_ID, panel);
        } else {
            warn!("Trigger element {trigger:?} is not in the page, appending the selection panel at the end");
            self.page.append(SELECTION_PANEL_ID, panel);
        }

        self.workflow = WorkflowState::Rendered;
        Ok(artists)
    }

    /// Checks or unchecks an artist in the selection panel. Returns false if the panel has no such artist.
    pub fn check_artist(&mut self, artist: &str, checked: bool) -> Result<bool> {
        let panel = self.selection_panel_mut()?;

        if panel.set_checked(artist, checked) == 0 {
            warn!("No checkbox for artist {artist:?} in the selection panel");
            Ok(false)
        } else {
            Ok(true)
        }
    }

    /// Replaces the free-text list of additional artists in the selection panel.
    pub fn set_additional_artists(&mut self, artists: &str) -> Result<()> {
        self.selection_panel_mut()?
            .set_input_value(ADDITIONAL_ARTISTS_INPUT_ID, artists);

        Ok(())
    }

    /// The artists the selection panel would currently submit.
    pub fn current_selection(&self) -> Result<ArtistSelection> {
        let panel = self.page.get(SELECTION_PANEL_ID).ok_or(Error::NoSelectionPanel)?;

        Ok(ArtistSelection::new(
            panel.checked_values(),
            panel.input_value(ADDITIONAL_ARTISTS_INPUT_ID).unwrap_or_default(),
        ))
    }

    /// Creates a playlist from the checked artists followed by the additional ones, shows the backend's message and
    /// removes the selection panel.
    pub async fn confirm_artist_selection(&mut self) -> Result<PlaylistCreated> {
        let prepared = self
            .current_selection()
            .and_then(|selection| Ok((self.store.session()?, selection)));

        let (session, selection) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.abort_workflow(&e);
                return Err(e);
            }
        };

        debug!("Creating playlist from {} artists", selection.len());
        self.workflow = WorkflowState::Submitting;

        let result = self
            .client
            .create_artist_playlist(&session, &selection)
            .send_async()
            .await;

        match &result {
            Ok(created) => {
                self.page.remove(SELECTION_PANEL_ID);
                self.workflow = WorkflowState::Idle;
                self.page.set_status(created.message.as_str());
            }

            Err(e) => self.abort_workflow(e),
        }

        result
    }

    /// Forgets the stored user.
    pub fn sign_out(&mut self) -> Result<()> {
        if let Err(e) = self.store.clear() {
            self.show_error(&e);
            return Err(e);
        }

        self.page.remove(SELECTION_PANEL_ID);
        self.workflow = WorkflowState::Idle;
        self.page.set_status(SIGNED_OUT_MESSAGE);
        Ok(())
    }

    fn selection_panel_mut(&mut self) -> Result<&mut View> {
        self.page.get_mut(SELECTION_PANEL_ID).ok_or(Error::NoSelectionPanel)
    }

    fn abort_workflow(&mut self, err: &Error) {
        self.page.remove(SELECTION_PANEL_ID);
        self.workflow = WorkflowState::Idle;
        self.show_error(err);
    }

    fn show_error(&mut self, err: &Error) {
        match err {
            Error::NotAuthenticated | Error::NoCatalogSelected => warn!("{err}"),
            _ => error!("Error: {err}"),
        }

        self.page.set_status(status_message(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BackendClientBuilder;

    // nothing listens here; the tests below never reach the network
    fn controller() -> Controller {
        let client = BackendClientBuilder::new()
            .base_url("http://127.0.0.1:9/")
            .build()
            .unwrap();

        let mut page = Page::new();
        page.append("artist-playlist-button", View::button("artist-playlist-button", "Artist Playlist"));

        Controller::with_page(client, MemorySessionStore::new(), page)
    }

    #[test]
    fn successful_callback_stores_user() {
        let mut controller = controller();

        let user_id = controller
            .handle_auth_callback("https://example.github.io/?auth_success=true&user_id=U123")
            .unwrap();

        assert_eq!(user_id.as_ref().map(UserId::as_str), Some("U123"));
        assert_eq!(controller.store().load().unwrap(), user_id);
        assert_eq!(controller.page().status(), Some(AUTH_SUCCESS_MESSAGE));
    }

    #[test]
    fn failed_callback_changes_nothing() {
        let mut controller = controller();

        for url in [
            "https://example.github.io/?auth_success=false&user_id=U123",
            "https://example.github.io/?auth_success=true",
            "https://example.github.io/",
        ] {
            assert_eq!(controller.handle_auth_callback(url).unwrap(), None);
        }

        assert_eq!(controller.store().load().unwrap(), None);
        assert_eq!(controller.page().status(), None);
    }

    #[test]
    fn new_callback_overwrites_user() {
        let mut controller = controller();
        controller
            .handle_auth_callback("https://example.github.io/?auth_success=true&user_id=first")
            .unwrap();
        controller
            .handle_auth_callback("https://example.github.io/?auth_success=true&user_id=second")
            .unwrap();

        assert_eq!(controller.store().load().unwrap(), Some(UserId::new("second").unwrap()));
    }

    #[tokio::test]
    async fn catalog_request_requires_authentication() {
        let mut controller = controller();
        let input = CatalogInput::Text("Master_Catalog.csv".to_owned());

        assert!(matches!(
            controller.submit_catalog_request(&input).await,
            Err(Error::NotAuthenticated)
        ));
        assert_eq!(controller.page().status(), Some(NOT_AUTHENTICATED_MESSAGE));
    }

    #[tokio::test]
    async fn catalog_request_requires_selection() {
        let mut controller = controller();
        controller
            .handle_auth_callback("https://example.github.io/?auth_success=true&user_id=U123")
            .unwrap();

        let input = CatalogInput::radio(["Master", "Chill"], None);

        assert!(matches!(
            controller.submit_catalog_request(&input).await,
            Err(Error::NoCatalogSelected)
        ));
        assert_eq!(controller.page().status(), Some(NO_CATALOG_MESSAGE));
    }

    #[tokio::test]
    async fn artist_selection_requires_authentication() {
        let mut controller = controller();

        assert!(matches!(
            controller.open_artist_selection("artist-playlist-button").await,
            Err(Error::NotAuthenticated)
        ));
        assert_eq!(controller.page().status(), Some(NOT_AUTHENTICATED_MESSAGE));
        assert_eq!(controller.page().count(SELECTION_PANEL_ID), 0);
        assert_eq!(controller.workflow_state(), WorkflowState::Idle);
    }

    #[test]
    fn panel_interaction_without_panel() {
        let mut controller = controller();

        assert!(matches!(controller.check_artist("A", true), Err(Error::NoSelectionPanel)));
        assert!(matches!(
            controller.set_additional_artists("A, B"),
            Err(Error::NoSelectionPanel)
        ));
    }

    #[test]
    fn selection_from_rendered_panel() {
        let mut controller = controller();
        controller.page_mut().insert_after(
            "artist-playlist-button",
            SELECTION_PANEL_ID,
            view::artist_selection_panel(&["A".to_owned(), "B".to_owned()]),
        );

        assert!(controller.check_artist("A", true).unwrap());
        assert!(!controller.check_artist("Z", true).unwrap());
        controller.set_additional_artists("C, D").unwrap();

        assert_eq!(controller.current_selection().unwrap().artists(), ["A", "C", "D"]);
    }

    #[test]
    fn error_status_messages() {
        assert_eq!(
            status_message(&Error::Backend {
                status: 400,
                message: Some("Invalid client ID".to_owned())
            }),
            "An error occurred: Invalid client ID"
        );
        assert_eq!(
            status_message(&Error::Backend {
                status: 500,
                message: None
            }),
            "An error occurred: Unknown error"
        );
    }

    #[test]
    fn sign_out_forgets_user() {
        let mut controller = controller();
        controller
            .handle_auth_callback("https://example.github.io/?auth_success=true&user_id=U123")
            .unwrap();

        controller.sign_out().unwrap();

        assert_eq!(controller.store().load().unwrap(), None);
        assert_eq!(controller.page().status(), Some(SIGNED_OUT_MESSAGE));
    }
}
