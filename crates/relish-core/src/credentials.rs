use crate::error::{CredentialError, Result};
use tracing::debug;

/// Keychain service name under which credentials are stored.
pub const SERVICE: &str = "relish-notifier";
/// Keychain account names for the two credential fields.
pub const USERNAME_ACCOUNT: &str = "EMAIL";
pub const PASSWORD_ACCOUNT: &str = "PASSWORD";
/// Environment variables used when the keychain is unavailable.
pub const USERNAME_ENV: &str = "RELISH_USERNAME";
pub const PASSWORD_ENV: &str = "RELISH_PASSWORD";

/// Login credentials for the tracked site.
///
/// Resolved once at startup and held for the process lifetime. Never
/// persisted by this program.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A secure credential store keyed by service and account name.
pub trait SecretStore {
    /// Look up a secret. Any failure (no entry, no backend, empty value)
    /// is reported as a string reason; the caller falls back to the
    /// environment without retrying the store.
    fn get(&self, service: &str, account: &str) -> std::result::Result<String, String>;
}

/// System keychain backed by the `keyring` crate.
pub struct Keychain;

impl SecretStore for Keychain {
    fn get(&self, service: &str, account: &str) -> std::result::Result<String, String> {
        let entry = keyring::Entry::new(service, account).map_err(|e| e.to_string())?;
        entry.get_password().map_err(|e| e.to_string())
    }
}

impl Credentials {
    /// Resolve credentials from the system keychain, falling back to
    /// environment variables.
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(&Keychain, |var| std::env::var(var).ok())
    }

    /// Resolve each field through an ordered strategy chain: the secure
    /// store first, then the environment. The first non-empty value wins;
    /// if both strategies come up empty the error names the environment
    /// variable the operator can set.
    pub fn resolve_from<E>(store: &dyn SecretStore, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let username = resolve_field(store, &env, "username", USERNAME_ACCOUNT, USERNAME_ENV)?;
        let password = resolve_field(store, &env, "password", PASSWORD_ACCOUNT, PASSWORD_ENV)?;
        Ok(Self { username, password })
    }
}

fn resolve_field<E>(
    store: &dyn SecretStore,
    env: &E,
    field: &'static str,
    account: &str,
    env_var: &'static str,
) -> Result<String>
where
    E: Fn(&str) -> Option<String>,
{
    let store_reason = match store.get(SERVICE, account) {
        Ok(value) if !value.is_empty() => {
            debug!(field, "resolved credential from keychain");
            return Ok(value);
        }
        Ok(_) => "empty entry".to_string(),
        Err(reason) => reason,
    };

    match env(env_var) {
        Some(value) if !value.is_empty() => {
            debug!(field, env_var, "resolved credential from environment");
            Ok(value)
        }
        _ => Err(CredentialError::Unresolved {
            field,
            store: store_reason,
            env_var,
        }),
    }
}
