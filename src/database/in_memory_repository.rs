use crate::models::booking::Booking;
use crate::models::session::SessionUser;
use crate::models::user::User;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-wide store behind every repository trait.
///
/// Cloning is cheap and every clone sees the same tables. Each table has its own
/// lock and every mutation happens under a single write guard, so inserts and id
/// assignment are atomic without any cross-table transaction.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    pub(super) tables: Arc<Tables>,
}

#[derive(Default)]
pub(super) struct Tables {
    /// Keyed by email.
    pub(super) users: RwLock<HashMap<String, User>>,
    /// Keyed by the SHA-256 digest of the session token.
    pub(super) sessions: RwLock<HashMap<String, SessionUser>>,
    pub(super) bookings: RwLock<BookingLedger>,
}

#[derive(Default)]
pub(super) struct BookingLedger {
    pub(super) last_id: u64,
    pub(super) rows: Vec<Booking>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}
