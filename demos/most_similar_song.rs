use dotenvy::dotenv;
use mixtape::prelude::*;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let client = BackendClientBuilder::from_env()
        .expect("invalid backend configuration in environment")
        .build()
        .expect("failed to build backend client");

    // hosted backends sleep when idle, wake it up before anything else
    println!("{}", client.ping().send_async().await.expect("backend is unreachable"));

    let user_id = UserId::new(std::env::var("USER_ID").expect("user ID not in environment")).unwrap();
    let mut controller = Controller::new(client, MemorySessionStore::with_user_id(user_id));

    let catalog = std::env::args().nth(1).unwrap_or_else(|| "Master_Catalog.csv".to_owned());
    controller.submit_catalog_request(&CatalogInput::Text(catalog)).await.ok();

    println!("{}", controller.page().status().unwrap_or_default());
}
