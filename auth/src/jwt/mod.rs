pub mod claims;
pub mod config;
pub mod errors;
pub mod handler;
mod signer;
pub mod token;
pub mod validation;

pub use claims::Claims;
pub use config::JwtConfig;
pub use config::Secret;
pub use errors::JwtError;
pub use handler::create;
pub use handler::verify;
pub use handler::verify_at;
pub use handler::JwtHandler;
pub use token::parse_token;
pub use token::split_token;
pub use token::ParsedToken;
pub use validation::validate_claims;
pub use validation::validate_timing;
