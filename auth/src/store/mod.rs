pub mod errors;
pub mod models;
pub mod ports;

pub use errors::StoreError;
pub use models::NewUser;
pub use models::User;
pub use ports::UserStore;
