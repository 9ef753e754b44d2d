#![allow(dead_code)]

use mixtape::{
    client::{BackendClient, BackendClientBuilder},
    controller::Controller,
    session::{MemorySessionStore, UserId},
    view::{Page, View},
};
use wiremock::MockServer;

pub const TRIGGER_ID: &str = "artist-playlist-button";
pub const USER_ID: &str = "U123";

pub fn client(server: &MockServer) -> BackendClient {
    BackendClientBuilder::new()
        .base_url(server.uri())
        .build()
        .expect("failed to build backend client")
}

/// A page laid out like the hosted one: the credentials form, the catalog form, the artist playlist button and the
/// status line, in that order.
pub fn page() -> Page {
    let mut page = Page::new();
    page.append("credentials-form", View::container(Some("credentials-form"), []));
    page.append("catalog-form", View::container(Some("catalog-form"), []));
    page.append(TRIGGER_ID, View::button(TRIGGER_ID, "Artist Playlist"));
    page.append("status", View::text(""));
    page
}

pub fn controller(server: &MockServer) -> Controller {
    Controller::with_page(client(server), MemorySessionStore::new(), page())
}

pub fn authenticated_controller(server: &MockServer) -> Controller {
    Controller::with_page(
        client(server),
        MemorySessionStore::with_user_id(UserId::new(USER_ID).unwrap()),
        page(),
    )
}
