use uuid::Uuid;

/// Snapshot of the user taken when the session was minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}
