use crate::config::{AvailabilityConfig, SeedUser};
use crate::database::in_memory_repository::InMemoryRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::service::availability::AvailabilityEngine;
use rocket::fairing::AdHoc;

async fn init_store(seed_users: &[SeedUser]) -> Result<InMemoryRepository, AppError> {
    let repo = InMemoryRepository::new();
    for seed in seed_users {
        repo.create_user(&seed.name, &seed.email, &seed.password).await?;
    }
    Ok(repo)
}

/// Builds the in-memory store, loads the seed accounts and hands it to Rocket.
/// Launch is aborted when a seed account cannot be created.
pub fn stage_store(seed_users: Vec<SeedUser>) -> AdHoc {
    AdHoc::try_on_ignite("In-memory store", |rocket| async move {
        match init_store(&seed_users).await {
            Ok(repo) => {
                tracing::info!(users = seed_users.len(), "Store initialized with seed users");
                Ok(rocket.manage(repo))
            }
            Err(e) => {
                tracing::error!("Failed to initialize store: {}", e);
                Err(rocket)
            }
        }
    })
}

pub fn stage_availability(config: AvailabilityConfig) -> AdHoc {
    AdHoc::on_ignite("Availability engine", |rocket| async move {
        let engine = AvailabilityEngine::new(&config);
        tracing::info!(
            latency_ms = engine.latency().as_millis() as u64,
            seeded = config.seed.is_some(),
            "Availability engine ready"
        );
        rocket.manage(engine)
    })
}
