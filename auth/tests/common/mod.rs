use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use deadlight_auth::AuthContext;
use deadlight_auth::Authenticator;
use deadlight_auth::JwtConfig;
use deadlight_auth::NewUser;
use deadlight_auth::PasswordConfig;
use deadlight_auth::PasswordHashRecord;
use deadlight_auth::StoreError;
use deadlight_auth::User;
use deadlight_auth::UserStore;

pub const SECRET: &[u8] = b"integration_secret_at_least_32_bytes";

/// In-memory user store standing in for the host's database
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<u64, User>>,
}

impl InMemoryUserStore {
    pub fn get(&self, user_id: u64) -> Option<User> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    pub fn deactivate(&self, user_id: u64) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::UsernameAlreadyExists(new_user.username));
        }

        let user = User {
            id: users.len() as u64 + 1,
            username: new_user.username,
            role: new_user.role,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: u64,
        record: &PasswordHashRecord,
    ) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(StoreError::NotFound(user_id))?;
        user.password_hash = record.clone();
        Ok(())
    }

    async fn update_last_login(&self, user_id: u64, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(StoreError::NotFound(user_id))?;
        user.last_login = Some(at);
        Ok(())
    }
}

/// Authenticator wired to a fresh in-memory store
pub struct TestAuth {
    pub authenticator: Authenticator<InMemoryUserStore>,
    pub store: Arc<InMemoryUserStore>,
}

impl TestAuth {
    pub fn new() -> Self {
        let jwt_config = JwtConfig::new(SECRET, 3_600)
            .expect("Failed to build JWT config")
            .with_issuer("deadlight")
            .with_audience("web");
        let password_config = PasswordConfig {
            iterations: 1_000,
            ..PasswordConfig::default()
        };
        let context = AuthContext::new(jwt_config, password_config, "session", 86_400)
            .expect("Failed to build context");

        let store = Arc::new(InMemoryUserStore::default());
        let authenticator = Authenticator::new(Arc::new(context), store.clone())
            .expect("Failed to build authenticator");

        Self {
            authenticator,
            store,
        }
    }
}
