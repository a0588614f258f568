mod auth;
mod config;
mod database;
mod error;
mod middleware;
mod models;
mod routes;
mod service;
mod store;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;

use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use crate::store::{stage_availability, stage_store};
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_okapi::okapi::openapi3::Server;
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};
use rocket_okapi::{get_openapi_route, okapi::merge::marge_spec_list};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str, json_format: bool) {
    // RUST_LOG takes precedence over the configured level, e.g.
    //   RUST_LOG=travel_booking::service=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    // a second instance in the same process keeps the first subscriber
    let _ = if json_format { subscriber.json().try_init() } else { subscriber.try_init() };
}

fn build_cors(cors_config: &config::CorsConfig) -> Result<CorsOptions, BuildError> {
    let is_wildcard = cors_config.allowed_origins.len() == 1 && cors_config.allowed_origins[0] == "*";

    if is_wildcard && cors_config.allow_credentials {
        return Err(BuildError::WildcardWithCredentials);
    }

    let allowed_origins = if cors_config.allowed_origins.is_empty() {
        AllowedOrigins::some_exact::<&str>(&[])
    } else if is_wildcard {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&cors_config.allowed_origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    Ok(CorsOptions {
        allowed_origins,
        allowed_methods: vec![Method::Get, Method::Post, Method::Options].into_iter().map(From::from).collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Content-Type", "Authorization", "Accept"]),
        allow_credentials: cors_config.allow_credentials,
        ..Default::default()
    })
}

fn get_swagger_config(openapi_url: &str) -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: openapi_url.to_string(),
        ..Default::default()
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return config::DEFAULT_API_BASE_PATH.to_string();
    }

    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }

    normalized
}

fn join_base_path(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let suffix = path.trim_start_matches('/');

    match (base.is_empty(), suffix.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", suffix),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, suffix),
    }
}

struct RouteSpec {
    path: &'static str,
    routes: Vec<rocket::Route>,
    openapi: rocket_okapi::okapi::openapi3::OpenApi,
}

fn collect_route_specs() -> Vec<RouteSpec> {
    let (session_routes, session_openapi) = app_routes::user::routes();
    let (flight_routes, flight_openapi) = app_routes::flight::routes();
    let (booking_routes, booking_openapi) = app_routes::booking::routes();
    let (health_routes, health_openapi) = app_routes::health::routes();

    vec![
        RouteSpec {
            path: "",
            routes: session_routes,
            openapi: session_openapi,
        },
        RouteSpec {
            path: "/check-flights",
            routes: flight_routes,
            openapi: flight_openapi,
        },
        RouteSpec {
            path: "/bookings",
            routes: booking_routes,
            openapi: booking_openapi,
        },
        RouteSpec {
            path: "/health",
            routes: health_routes,
            openapi: health_openapi,
        },
    ]
}

fn mount_api_routes(mut rocket: Rocket<Build>, base_path: &str, enable_swagger: bool) -> Result<Rocket<Build>, BuildError> {
    let route_specs = collect_route_specs();

    if !enable_swagger {
        for spec in route_specs {
            rocket = rocket.mount(join_base_path(base_path, spec.path), spec.routes);
        }
        return Ok(rocket);
    }

    let mut openapi_list = Vec::new();
    for spec in route_specs {
        rocket = rocket.mount(join_base_path(base_path, spec.path), spec.routes);
        openapi_list.push((spec.path, spec.openapi));
    }

    let mut openapi_docs = marge_spec_list(&openapi_list).map_err(|e| BuildError::OpenApi(e.to_string()))?;
    openapi_docs.servers = vec![Server {
        url: base_path.to_string(),
        ..Default::default()
    }];

    let settings = rocket_okapi::settings::OpenApiSettings::default();
    rocket = rocket.mount(base_path, vec![get_openapi_route(openapi_docs, &settings)]);

    let docs_path = join_base_path(base_path, "docs");
    let openapi_url = join_base_path(base_path, "openapi.json");
    Ok(rocket.mount(docs_path, make_swagger_ui(&get_swagger_config(&openapi_url))))
}

/// Reasons a Rocket instance cannot be assembled from a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid CORS configuration: {0}")]
    Cors(#[from] rocket_cors::Error),
    #[error("Invalid CORS configuration: wildcard origins (*) cannot be combined with credentials")]
    WildcardWithCredentials,
    #[error("Could not merge OpenAPI spec: {0}")]
    OpenApi(String),
}

pub fn build_rocket(mut config: Config) -> Result<Rocket<Build>, BuildError> {
    init_tracing(&config.logging.level, config.logging.json_format);

    let cors = build_cors(&config.cors)?.to_cors()?;

    config.api.base_path = normalize_base_path(&config.api.base_path);
    let base_path = config.api.base_path.clone();

    tracing::info!(
        base_path = %base_path,
        auth_mode = config.auth.mode.as_str(),
        swagger = config.api.enable_swagger,
        "Building travel booking service"
    );

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));

    let rocket = rocket::custom(figment)
        .attach(cors)
        .attach(RequestLogger)
        .attach(stage_store(config.auth.seed_users.clone()))
        .attach(stage_availability(config.availability.clone()));

    let rocket = mount_api_routes(rocket, &base_path, config.api.enable_swagger)?;

    Ok(rocket.manage(config).register(
        base_path.as_str(),
        catchers![
            app_routes::error::bad_request,
            app_routes::error::unauthorized,
            app_routes::error::not_found,
            app_routes::error::unprocessable_entity,
            app_routes::error::internal_error
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{client_with, test_config};
    use rocket::http::Status;

    #[test]
    fn base_paths_are_normalized() {
        assert_eq!(normalize_base_path(""), "/api");
        assert_eq!(normalize_base_path("  "), "/api");
        assert_eq!(normalize_base_path("v1/"), "/v1");
        assert_eq!(normalize_base_path("/travel//"), "/travel");
        assert_eq!(normalize_base_path("/"), "/");
    }

    #[test]
    fn joins_never_double_slashes() {
        assert_eq!(join_base_path("/api", ""), "/api");
        assert_eq!(join_base_path("/api", "/bookings"), "/api/bookings");
        assert_eq!(join_base_path("/", "/bookings"), "/bookings");
        assert_eq!(join_base_path("/", ""), "/");
        assert_eq!(join_base_path("/api/", "docs"), "/api/docs");
    }

    #[test]
    fn wildcard_with_credentials_is_refused() {
        let mut config = test_config();
        config.cors.allow_credentials = true;
        assert!(matches!(build_rocket(config), Err(BuildError::WildcardWithCredentials)));
    }

    #[rocket::async_test]
    async fn custom_base_path_moves_every_route() {
        let mut config = test_config();
        config.api.base_path = "travel/".to_string();
        let client = client_with(config).await;

        assert_eq!(client.get("/travel/health").dispatch().await.status(), Status::Ok);
        assert_eq!(client.get("/api/health").dispatch().await.status(), Status::NotFound);
        assert_eq!(client.get("/travel/bookings").dispatch().await.status(), Status::Unauthorized);
    }

    #[rocket::async_test]
    async fn openapi_document_is_served_when_enabled() {
        let client = client_with(test_config()).await;
        let response = client.get("/api/openapi.json").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let document: serde_json::Value = response.into_json().await.unwrap();
        let paths = document["paths"].as_object().unwrap();
        assert!(paths.contains_key("/login"));
        assert!(paths.keys().any(|path| path.starts_with("/check-flights")));
        assert!(paths.keys().any(|path| path.starts_with("/bookings")));

        let mut config = test_config();
        config.api.enable_swagger = false;
        let client = client_with(config).await;
        assert_eq!(client.get("/api/openapi.json").dispatch().await.status(), Status::NotFound);
    }
}
