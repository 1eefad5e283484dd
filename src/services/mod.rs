// Service exports
pub mod auth;
pub mod store;

pub use auth::{AuthClient, AuthError, TokenIdentity};
pub use store::{DirectoryStore, StoreError};
