use crate::config::{AuthMode, Config};
use crate::database::in_memory_repository::InMemoryRepository;
use crate::error::app_error::AppError;
use crate::models::session::SessionUser;
use crate::service::auth::AuthService;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{Object, Responses, SecurityRequirement, SecurityScheme, SecuritySchemeData};
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<SessionUser> for CurrentUser {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Who is calling a protected route.
///
/// In multi-user mode this is always a logged-in user; requests without a valid
/// session never get this far. In single-user mode there is no gate and every
/// request is `Trusted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Trusted,
    User(CurrentUser),
}

impl Caller {
    /// Owner recorded on new bookings and used to filter listings.
    pub fn owner(&self) -> Option<Uuid> {
        match self {
            Caller::Trusted => None,
            Caller::User(user) => Some(user.id),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Caller::Trusted => "single-user",
            Caller::User(user) => &user.email,
        }
    }
}

/// Extracts the token from an `Authorization` header value. The bare token (what
/// the booking page sends) and `Bearer <token>` are both accepted.
pub(crate) fn parse_authorization_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Session token carried by the request, if there is one.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionToken {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, ()> {
        let token = req.headers().get_one("Authorization").and_then(parse_authorization_header).map(str::to_string);
        Outcome::Success(SessionToken(token))
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Caller {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let (Some(config), Some(repo)) = (req.rocket().state::<Config>(), req.rocket().state::<InMemoryRepository>()) else {
            return Outcome::Error((Status::InternalServerError, AppError::storage("application state is not managed")));
        };

        if config.auth.mode == AuthMode::SingleUser {
            return Outcome::Success(Caller::Trusted);
        }

        let token = req.headers().get_one("Authorization").and_then(parse_authorization_header);
        match AuthService::new(repo).authenticate(token).await {
            Ok(user) => {
                let current_user = CurrentUser::from(user);
                req.local_cache(|| Some(current_user.clone()));
                Outcome::Success(Caller::User(current_user))
            }
            Err(err @ AppError::Unauthenticated) => Outcome::Error((Status::Unauthorized, err)),
            Err(err) => Outcome::Error((Status::InternalServerError, err)),
        }
    }
}

fn session_security() -> RequestHeaderInput {
    let security_scheme = SecurityScheme {
        description: Some("Session token returned by POST /login, sent as the Authorization header (optionally prefixed with `Bearer `).".to_string()),
        data: SecuritySchemeData::ApiKey {
            name: "Authorization".to_string(),
            location: "header".to_string(),
        },
        extensions: Object::default(),
    };

    let mut security_req = SecurityRequirement::new();
    security_req.insert("sessionToken".to_string(), Vec::new());

    RequestHeaderInput::Security("sessionToken".to_string(), security_scheme, security_req)
}

impl<'a> OpenApiFromRequest<'a> for Caller {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(session_security())
    }

    fn get_responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response};
        let mut responses = Responses::default();
        responses.responses.insert(
            "401".to_string(),
            RefOr::Object(Response {
                description: "Unauthorized - missing or unknown session token".to_string(),
                ..Default::default()
            }),
        );
        Ok(responses)
    }
}

impl<'a> OpenApiFromRequest<'a> for SessionToken {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(session_security())
    }
}
