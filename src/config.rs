use rocket::figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_PATH: &str = "/api";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub availability: AvailabilityConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_path: String,
    pub enable_swagger: bool,
}

/// Whether protected routes require a session token.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Every protected call needs a valid session; bookings belong to their creator.
    #[default]
    MultiUser,
    /// No gate at all; every request is trusted and bookings are shared.
    SingleUser,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::MultiUser => "multi_user",
            AuthMode::SingleUser => "single_user",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeedUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub seed_users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AvailabilityConfig {
    /// Delay applied before every availability answer, emulating the upstream reservation system.
    pub simulated_latency_ms: u64,
    /// Fixes the generator used for destinations outside the flight table.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            address: "127.0.0.1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            enable_swagger: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            seed_users: vec![SeedUser {
                name: "Demo User".to_string(),
                email: "demo@example.com".to_string(),
                password: "demo123".to_string(),
            }],
        }
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 800,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Compiled defaults
    /// 2. Travel.toml (`[auth]`, `[availability]`, ... tables map to the sections)
    /// 3. Environment variables prefixed with TRAVEL_, sections split on `__`
    ///    (e.g. TRAVEL_AUTH__MODE=single_user)
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("Travel.toml"))
            .merge(Env::prefixed("TRAVEL_").split("__"))
    }
}
