use crate::database::in_memory_repository::InMemoryRepository;
use crate::error::app_error::AppError;
use crate::models::user::User;
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::collections::hash_map::Entry;
use std::sync::LazyLock;
use uuid::Uuid;

/// A real Argon2 hash generated on first use, verified against when the email is
/// unknown so that both login paths cost the same.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| password_hash("dummy-never-matches").ok());

#[async_trait::async_trait]
pub trait UserRepository {
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait::async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        let password_hash = password_hash(password)?;

        let mut users = self.tables.users.write()?;
        match users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(AppError::InvalidRequest(format!("User {} already exists", email))),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    email: email.to_string(),
                    password_hash,
                };
                Ok(slot.insert(user).clone())
            }
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.users.read()?.get(email).cloned())
    }
}

pub fn verify_password(user: &User, password: &str) -> Result<(), AppError> {
    let password_hash = PasswordHash::new(&user.password_hash).map_err(|e| AppError::password_hash("Failed to parse stored password hash", e))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &password_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

/// Throwaway Argon2 verification used when no account matches the email.
pub fn dummy_verify(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref().and_then(|hash| PasswordHash::new(hash).ok()) {
        // only the time spent matters; the outcome is always a mismatch
        let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
    }
}

pub(crate) fn password_hash(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stored_credentials_are_salted_hashes() {
        let repo = InMemoryRepository::new();
        let user = repo.create_user("Demo User", "demo@example.com", "demo123").await.unwrap();

        assert_ne!(user.password_hash, "demo123");
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(verify_password(&user, "demo123").is_ok());
        assert!(matches!(verify_password(&user, "demo124"), Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn same_password_gets_distinct_hashes() {
        let repo = InMemoryRepository::new();
        let first = repo.create_user("A", "a@example.com", "secret").await.unwrap();
        let second = repo.create_user("B", "b@example.com", "secret").await.unwrap();
        assert_ne!(first.password_hash, second.password_hash);
    }

    #[tokio::test]
    async fn email_is_unique() {
        let repo = InMemoryRepository::new();
        repo.create_user("Demo User", "demo@example.com", "demo123").await.unwrap();
        let err = repo.create_user("Other", "demo@example.com", "x").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn lookup_is_by_exact_email() {
        let repo = InMemoryRepository::new();
        repo.create_user("Demo User", "demo@example.com", "demo123").await.unwrap();

        assert!(repo.get_user_by_email("demo@example.com").await.unwrap().is_some());
        assert!(repo.get_user_by_email("DEMO@example.com").await.unwrap().is_none());
        assert!(repo.get_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[test]
    fn corrupt_stored_hash_is_an_internal_error() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Broken".to_string(),
            email: "broken@example.com".to_string(),
            password_hash: "plaintext".to_string(),
        };
        assert!(matches!(verify_password(&user, "plaintext"), Err(AppError::PasswordHash { .. })));
    }
}
