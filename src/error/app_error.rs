use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{Request, Response};
use rocket_okapi::OpenApiError;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use std::io::Cursor;
use std::sync::PoisonError;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Please login first")]
    Unauthenticated,
    #[error("Storage unavailable")]
    StorageFailure { message: String },
    #[error("Internal server error")]
    PasswordHash { message: String },
}

impl AppError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure { message: message.into() }
    }

    pub fn password_hash(message: impl Into<String>, source: password_hash::Error) -> Self {
        Self::PasswordHash {
            message: format!("{}: {}", message.into(), source),
        }
    }

    fn is_server_error(&self) -> bool {
        Status::from(self).class().is_server_error()
    }
}

impl From<password_hash::Error> for AppError {
    fn from(e: password_hash::Error) -> Self {
        AppError::password_hash("Password hashing failed", e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let errors = e.field_errors();
        let mut fields: Vec<&str> = errors.keys().map(|field| field.as_ref()).collect();
        fields.sort_unstable();
        AppError::InvalidRequest(format!("Missing required fields: {}", fields.join(", ")))
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(e: PoisonError<T>) -> Self {
        AppError::storage(format!("store lock poisoned: {}", e))
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::InvalidRequest(_) => Status::BadRequest,
            AppError::InvalidCredentials => Status::Unauthorized,
            AppError::Unauthenticated => Status::Unauthorized,
            AppError::StorageFailure { .. } => Status::InternalServerError,
            AppError::PasswordHash { .. } => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        let method = req.method();
        let uri = req.uri();

        let request_id = req
            .local_cache(|| None::<crate::middleware::RequestId>)
            .as_ref()
            .map(|r| r.0.as_str())
            .unwrap_or("unknown");

        let caller = req
            .local_cache(|| None::<crate::auth::CurrentUser>)
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_else(|| "anonymous".to_string());

        if self.is_server_error() {
            error!(error = ?self, request_id = %request_id, caller = %caller, method = %method, uri = %uri, "request failed");
        } else {
            warn!(error = %self, request_id = %request_id, caller = %caller, method = %method, uri = %uri, "request rejected");
        }

        let status = Status::from(&self);
        let body = serde_json::json!({ "error": self.to_string() }).to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> Result<Responses, OpenApiError> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};
        let mut responses = Responses::default();
        for (code, description) in [
            ("400", "Bad Request - a required field is missing"),
            ("401", "Unauthorized - missing session or invalid credentials"),
            ("500", "Internal Server Error"),
        ] {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(responses)
    }
}
