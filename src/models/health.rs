use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// Static description of what this instance offers.
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    pub auth_mode: String,
    pub endpoints: Vec<String>,
    pub known_destinations: Vec<String>,
}
