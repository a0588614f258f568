use crate::config::Config;
use crate::build_rocket;
use rocket::http::ContentType;
use rocket::local::asynchronous::Client;
use serde_json::{Value, json};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";

/// Default configuration with no simulated latency and a fixed generator seed.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.availability.simulated_latency_ms = 0;
    config.availability.seed = Some(7);
    config
}

pub async fn client_with(config: Config) -> Client {
    Client::tracked(build_rocket(config).expect("valid configuration"))
        .await
        .expect("valid rocket instance")
}

pub async fn test_client() -> Client {
    client_with(test_config()).await
}

pub async fn login_as(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body(json!({ "email": email, "password": password }).to_string())
        .dispatch()
        .await;
    let body: Value = response.into_json().await.expect("login response");
    body["session_token"].as_str().expect("session token").to_string()
}

pub async fn login(client: &Client) -> String {
    login_as(client, DEMO_EMAIL, DEMO_PASSWORD).await
}
