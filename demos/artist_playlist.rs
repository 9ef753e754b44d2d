use dotenvy::dotenv;
use mixtape::{prelude::*, view::View};

const TRIGGER_ID: &str = "artist-playlist-button";

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let client = BackendClientBuilder::from_env()
        .expect("invalid backend configuration in environment")
        .build()
        .expect("failed to build backend client");

    let store = FileSessionStore::new(std::env::var("SESSION_FILE").unwrap_or_else(|_| "session.json".to_owned()));

    let mut page = Page::new();
    page.append(TRIGGER_ID, View::button(TRIGGER_ID, "Artist Playlist"));

    let mut controller = Controller::with_page(client, store, page);

    if controller.store().load().unwrap().is_none() {
        controller
            .submit_credentials(std::env::var("CLIENT_ID").expect("Spotify client ID not in environment"))
            .await
            .ok();

        match controller.page().location() {
            Some(auth_url) => println!("Authorize URL: {auth_url}"),
            None => {
                println!("{}", controller.page().status().unwrap_or_default());
                return;
            }
        }

        let mut callback_url = String::new();
        println!("URL you were redirected to:");
        std::io::stdin().read_line(&mut callback_url).unwrap();

        controller.handle_auth_callback(callback_url.trim()).unwrap();
    }

    let artists = match controller.open_artist_selection(TRIGGER_ID).await {
        Ok(artists) => artists,
        Err(_) => {
            println!("{}", controller.page().status().unwrap_or_default());
            return;
        }
    };

    for (index, artist) in artists.iter().enumerate() {
        println!("{index}: {artist}");
    }

    let mut checked = String::new();
    println!("Artists to include (numbers, comma separated):");
    std::io::stdin().read_line(&mut checked).unwrap();

    for index in checked.split(',').filter_map(|index| index.trim().parse::<usize>().ok()) {
        if let Some(artist) = artists.get(index) {
            controller.check_artist(artist, true).unwrap();
        }
    }

    let mut additional = String::new();
    println!("Additional artists (comma separated):");
    std::io::stdin().read_line(&mut additional).unwrap();
    controller.set_additional_artists(additional.trim()).unwrap();

    controller.confirm_artist_selection().await.ok();
    println!("{}", controller.page().status().unwrap_or_default());
}
