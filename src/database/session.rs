use crate::database::in_memory_repository::InMemoryRepository;
use crate::error::app_error::AppError;
use crate::models::session::SessionUser;
use crate::models::user::User;
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};
use std::collections::hash_map::Entry;

const TOKEN_PREFIX: &str = "session_";
const TOKEN_RANDOM_CHARS: usize = 32;

#[async_trait::async_trait]
pub trait SessionRepository {
    /// Mints a fresh token for `user` and returns it. Only the digest is kept.
    async fn create_session(&self, user: &User) -> Result<String, AppError>;
    async fn get_session_user(&self, token: &str) -> Result<Option<SessionUser>, AppError>;
    /// Returns whether a session existed for `token`.
    async fn delete_session(&self, token: &str) -> Result<bool, AppError>;
}

#[async_trait::async_trait]
impl SessionRepository for InMemoryRepository {
    async fn create_session(&self, user: &User) -> Result<String, AppError> {
        let mut sessions = self.tables.sessions.write()?;
        loop {
            let token = generate_session_token();
            if let Entry::Vacant(slot) = sessions.entry(token_digest(&token)) {
                slot.insert(SessionUser {
                    id: user.id,
                    email: user.email.clone(),
                    name: user.name.clone(),
                });
                return Ok(token);
            }
        }
    }

    async fn get_session_user(&self, token: &str) -> Result<Option<SessionUser>, AppError> {
        let sessions = self.tables.sessions.read()?;
        Ok(sessions.get(&token_digest(token)).cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.tables.sessions.write()?.remove(&token_digest(token)).is_some())
    }
}

pub(crate) fn generate_session_token() -> String {
    format!("{}{}", TOKEN_PREFIX, Alphanumeric.sample_string(&mut rand::rng(), TOKEN_RANDOM_CHARS))
}

pub(crate) fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
