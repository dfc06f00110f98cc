pub mod config;
pub mod errors;
pub mod hasher;
pub mod record;

pub use config::PasswordAlgorithm;
pub use config::PasswordConfig;
pub use errors::PasswordError;
pub use hasher::derive_key;
pub use hasher::generate_salt;
pub use hasher::hash;
pub use hasher::verify;
pub use hasher::PasswordHasher;
pub use record::PasswordHashRecord;
