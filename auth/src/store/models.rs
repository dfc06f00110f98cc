use chrono::DateTime;
use chrono::Utc;

use crate::password::PasswordHashRecord;

/// An authenticated principal as held by the host.
///
/// The library only ever works on transient copies; the host's store is the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub role: String,
    pub password_hash: PasswordHashRecord,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// A user about to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub role: String,
    pub password_hash: PasswordHashRecord,
}
