use serde::{Serialize, Deserialize};

use crate::code::OtpCode;
use crate::error::GAuthError;
use crate::hotp::derive_time_based_code;
use crate::types::Timestamp;
use crate::utils::remaining_lifetime;

/// One enrolled account as read from a credential source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
    pub secret: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub domain: String,
}

impl Credential {
    pub fn new(secret: &str, user: &str, domain: &str) -> Self {
        Self {
            secret: secret.to_string(),
            user: user.to_string(),
            domain: domain.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub user: String,
    pub domain: String,
    pub code: Result<OtpCode, GAuthError>,
    pub remaining_seconds: Timestamp,
}

/// Current codes for `credentials`, in order. A credential whose secret
/// does not decode carries the error in its own entry.
pub fn list_codes<'a, I>(credentials: I, now: Timestamp) -> Vec<CodeEntry>
    where I: IntoIterator<Item = &'a Credential>,
{
    let remaining_seconds = remaining_lifetime(now);

    credentials
        .into_iter()
        .map(|credential| CodeEntry {
            user: credential.user.clone(),
            domain: credential.domain.clone(),
            code: derive_time_based_code(&credential.secret, now),
            remaining_seconds,
        })
        .collect()
}
