use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::StoreError;
use super::models::NewUser;
use super::models::User;
use crate::password::PasswordHashRecord;

/// User persistence supplied by the embedding application.
///
/// The library never performs storage I/O of its own. Uniqueness of ids and
/// usernames is the implementation's responsibility.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve user by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `Backend` - Storage operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new user and assign its id.
    ///
    /// # Arguments
    /// * `new_user` - Username, role and password hash to store
    ///
    /// # Returns
    /// Created user with id, creation time and active flag set
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Backend` - Storage operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Replace a user's password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Backend` - Storage operation failed
    async fn update_password(
        &self,
        user_id: u64,
        record: &PasswordHashRecord,
    ) -> Result<(), StoreError>;

    /// Record a successful login time.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Backend` - Storage operation failed
    async fn update_last_login(&self, user_id: u64, at: DateTime<Utc>) -> Result<(), StoreError>;
}
