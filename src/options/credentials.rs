//! Credential selection for the storage client.

use std::fmt;
use tracing::warn;

/// Credentials handed to the client factory
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Explicit access key pair
    Basic {
        access_key_id: String,
        secret_access_key: String,
    },
    /// Named profile from the shared credentials file
    Profile(String),
    /// Defer to the provider's default credential chain
    Ambient,
}

impl Credentials {
    /// Pick credentials from the configured values.
    ///
    /// An explicit key pair wins over a profile. A pair with only one half set
    /// is ignored.
    pub fn resolve(
        profile: Option<&str>,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
    ) -> Credentials {
        match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                return Credentials::Basic {
                    access_key_id: access_key_id.to_string(),
                    secret_access_key: secret_access_key.to_string(),
                };
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!(
                    has_access_key_id = access_key_id.is_some(),
                    has_secret_access_key = secret_access_key.is_some(),
                    "Incomplete access key pair ignored"
                );
            }
            (None, None) => {}
        }

        match profile {
            Some(profile) => Credentials::Profile(profile.to_string()),
            None => Credentials::Ambient,
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Credentials::Ambient)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { access_key_id, .. } => f
                .debug_struct("Basic")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .finish(),
            Credentials::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            Credentials::Ambient => f.write_str("Ambient"),
        }
    }
}
