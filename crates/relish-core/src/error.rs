use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(
        "failed to get {field} from keyring ({store}) and {env_var} environment variable is not set"
    )]
    Unresolved {
        /// Which credential field could not be resolved ("username" or "password").
        field: &'static str,
        /// Why the secure store lookup failed (or "empty entry").
        store: String,
        /// The environment variable that would have been used as fallback.
        env_var: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CredentialError>;
