use crate::auth::SessionToken;
use crate::database::in_memory_repository::InMemoryRepository;
use crate::error::app_error::AppError;
use crate::models::user::{LoginRequest, LoginResponse};
use crate::service::auth::AuthService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;

/// Log in with email and password and receive a session token
#[openapi(tag = "Sessions")]
#[post("/login", data = "<payload>")]
pub async fn post_login(repo: &State<InMemoryRepository>, payload: Json<LoginRequest>) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::new(repo.inner()).login(&payload).await?;
    Ok(Json(response))
}

/// End the session whose token is in the Authorization header
#[openapi(tag = "Sessions")]
#[post("/logout")]
pub async fn post_logout(repo: &State<InMemoryRepository>, token: SessionToken) -> Result<Status, AppError> {
    AuthService::new(repo.inner()).logout(token.0.as_deref()).await?;
    Ok(Status::Ok)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![post_login, post_logout]
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{DEMO_EMAIL, DEMO_PASSWORD, login, test_client};
    use rocket::http::{ContentType, Header, Status};
    use serde_json::{Value, json};

    #[rocket::async_test]
    async fn login_returns_token_and_public_user_fields() {
        let client = test_client().await;
        let response = client
            .post("/api/login")
            .header(ContentType::JSON)
            .body(json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert!(body["session_token"].as_str().unwrap().starts_with("session_"));
        assert_eq!(body["user"], json!({ "name": "Demo User", "email": DEMO_EMAIL }));
        assert!(body["user"].get("password").is_none());
    }

    #[rocket::async_test]
    async fn bad_credentials_are_rejected_without_detail() {
        let client = test_client().await;
        for (email, password) in [(DEMO_EMAIL, "wrong"), ("ghost@example.com", DEMO_PASSWORD)] {
            let response = client
                .post("/api/login")
                .header(ContentType::JSON)
                .body(json!({ "email": email, "password": password }).to_string())
                .dispatch()
                .await;

            assert_eq!(response.status(), Status::Unauthorized);
            let body: Value = response.into_json().await.unwrap();
            assert_eq!(body["error"], "Invalid email or password");
        }
    }

    #[rocket::async_test]
    async fn missing_fields_are_bad_requests() {
        let client = test_client().await;
        let response = client
            .post("/api/login")
            .header(ContentType::JSON)
            .body(json!({ "email": DEMO_EMAIL }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "Missing required fields: password");
    }

    #[rocket::async_test]
    async fn logout_invalidates_the_token() {
        let client = test_client().await;
        let token = login(&client).await;

        let response = client.post("/api/logout").header(Header::new("Authorization", token.clone())).dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let response = client.get("/api/bookings").header(Header::new("Authorization", token.clone())).dispatch().await;
        assert_eq!(response.status(), Status::Unauthorized);

        let response = client.post("/api/logout").header(Header::new("Authorization", token)).dispatch().await;
        assert_eq!(response.status(), Status::Unauthorized);
    }
}
