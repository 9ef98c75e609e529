use mercadolibre_sdk::{Config, MeliClient, Site};
use serde::Deserialize;

#[derive(Deserialize)]
struct Item {
    id: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the example
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // MELI_APP_ID, MELI_APP_SECRET and MELI_REDIRECT_URI must be set
    let cfg = Config::from_env()?;
    let site = cfg.site.unwrap_or(Site::Argentina);
    let client = MeliClient::new(cfg)?;

    println!(
        "Visit to grant access: {}",
        client.authorization_url(site.auth_url(), "https://www.example.com")
    );

    let code = std::env::args()
        .nth(1)
        .ok_or("usage: example <authorization code>")?;
    let credential = client.authorize(&code).await?;
    println!("Credential: {}", serde_json::to_string(&credential)?);

    let me = client.get("/users/me").await?;
    println!("GET /users/me -> {}: {}", me.status(), me.text().await?);

    let body = serde_json::json!({
        "title": "Item de test - No Ofertar",
        "category_id": "MLA1912",
        "price": 10,
        "currency_id": "ARS",
        "available_quantity": 1,
        "buying_mode": "buy_it_now",
        "listing_type_id": "bronze",
        "condition": "new"
    });
    let created = client.post_json("/items", &body).await?;
    let item: Item = created.json().await?;
    println!("POST /items -> {}", item.id);

    let path = format!("/items/{}", item.id);
    let updated = client.put(&path, r#"{"available_quantity": 6}"#).await?;
    println!("PUT {} -> {}", path, updated.status());

    let deleted = client.delete(&path).await?;
    println!("DELETE {} -> {}", path, deleted.status());
    Ok(())
}
