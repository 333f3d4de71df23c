pub mod credentials;
pub mod error;
pub mod status;

pub use credentials::{Credentials, Keychain, SecretStore};
pub use error::{CredentialError, Result};
pub use status::OrderStatus;
