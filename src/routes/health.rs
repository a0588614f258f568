use crate::config::Config;
use crate::models::health::HealthResponse;
use crate::service::availability::known_destinations;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;

const ENDPOINTS: [(&str, &str); 6] = [
    ("POST", "/login"),
    ("POST", "/logout"),
    ("POST", "/check-flights"),
    ("POST", "/bookings"),
    ("GET", "/bookings"),
    ("GET", "/health"),
];

/// Service status and the endpoints it serves
#[openapi(tag = "Health")]
#[get("/")]
pub async fn healthcheck(config: &State<Config>) -> Json<HealthResponse> {
    let base_path = config.api.base_path.trim_end_matches('/');
    Json(HealthResponse {
        status: "Server is running!".to_string(),
        auth_mode: config.auth.mode.as_str().to_string(),
        endpoints: ENDPOINTS.iter().map(|(method, path)| format!("{} {}{}", method, base_path, path)).collect(),
        known_destinations: known_destinations().map(str::to_string).collect(),
    })
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![healthcheck]
}

#[cfg(test)]
mod tests {
    use crate::models::health::HealthResponse;
    use crate::test_utils::test_client;
    use rocket::http::Status;

    #[rocket::async_test]
    async fn health_check_works_without_a_session() {
        let client = test_client().await;
        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert!(response.headers().get_one("X-Request-Id").is_some());

        let health: HealthResponse = response.into_json().await.unwrap();
        assert_eq!(health.status, "Server is running!");
        assert_eq!(health.auth_mode, "multi_user");
        assert!(health.endpoints.contains(&"POST /api/check-flights".to_string()));
        assert!(health.known_destinations.contains(&"New York".to_string()));
    }
}
