use crate::database::session::SessionRepository;
use crate::database::user::{UserRepository, dummy_verify, verify_password};
use crate::error::app_error::AppError;
use crate::models::session::SessionUser;
use crate::models::user::{LoginRequest, LoginResponse, UserResponse};
use tracing::info;
use validator::Validate;

/// Login, token checks and logout on top of the user and session stores.
pub struct AuthService<'a, R> {
    repo: &'a R,
}

impl<'a, R> AuthService<'a, R>
where
    R: UserRepository + SessionRepository + Sync,
{
    pub fn new(repo: &'a R) -> Self {
        AuthService { repo }
    }

    /// Checks the credentials and opens a session. Whether the email exists is
    /// never revealed: a wrong email and a wrong password fail the same way.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let Some(user) = self.repo.get_user_by_email(&request.email).await? else {
            dummy_verify(&request.password);
            return Err(AppError::InvalidCredentials);
        };
        verify_password(&user, &request.password)?;

        let session_token = self.repo.create_session(&user).await?;
        info!(user_id = %user.id, email = %user.email, "user logged in");

        Ok(LoginResponse {
            session_token,
            user: UserResponse::from(&user),
        })
    }

    pub async fn authenticate(&self, token: Option<&str>) -> Result<SessionUser, AppError> {
        let token = token.filter(|token| !token.is_empty()).ok_or(AppError::Unauthenticated)?;
        self.repo.get_session_user(token).await?.ok_or(AppError::Unauthenticated)
    }

    pub async fn logout(&self, token: Option<&str>) -> Result<(), AppError> {
        let user = self.authenticate(token).await?;
        if let Some(token) = token {
            self.repo.delete_session(token).await?;
        }
        info!(user_id = %user.id, email = %user.email, "user logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::in_memory_repository::InMemoryRepository;

    async fn seeded_repo() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.create_user("Demo User", "demo@example.com", "demo123").await.unwrap();
        repo
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_then_authenticate_round_trips() {
        let repo = seeded_repo().await;
        let auth = AuthService::new(&repo);

        let response = auth.login(&login_request("demo@example.com", "demo123")).await.unwrap();
        assert_eq!(response.user.name, "Demo User");
        assert_eq!(response.user.email, "demo@example.com");

        let user = auth.authenticate(Some(&response.session_token)).await.unwrap();
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.name, "Demo User");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let repo = seeded_repo().await;
        let auth = AuthService::new(&repo);

        let wrong_password = auth.login(&login_request("demo@example.com", "nope")).await.unwrap_err();
        let unknown_email = auth.login(&login_request("ghost@example.com", "demo123")).await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn blank_fields_are_invalid_requests() {
        let repo = seeded_repo().await;
        let auth = AuthService::new(&repo);

        let err = auth.login(&login_request("", "demo123")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        let err = auth.login(&login_request("demo@example.com", "")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn missing_or_foreign_tokens_are_unauthenticated() {
        let repo = seeded_repo().await;
        let auth = AuthService::new(&repo);

        assert!(matches!(auth.authenticate(None).await, Err(AppError::Unauthenticated)));
        assert!(matches!(auth.authenticate(Some("")).await, Err(AppError::Unauthenticated)));
        assert!(matches!(auth.authenticate(Some("session_forged")).await, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn logout_ends_only_that_session() {
        let repo = seeded_repo().await;
        let auth = AuthService::new(&repo);
        let first = auth.login(&login_request("demo@example.com", "demo123")).await.unwrap();
        let second = auth.login(&login_request("demo@example.com", "demo123")).await.unwrap();

        auth.logout(Some(&first.session_token)).await.unwrap();

        assert!(matches!(auth.authenticate(Some(&first.session_token)).await, Err(AppError::Unauthenticated)));
        assert!(auth.authenticate(Some(&second.session_token)).await.is_ok());
        assert!(matches!(auth.logout(Some(&first.session_token)).await, Err(AppError::Unauthenticated)));
    }
}
