use std::fmt;
use std::str::FromStr;

use rand::{rngs::OsRng, RngCore};
use serde::{Serialize, Deserialize};
use sha2::{Digest, Sha512};

use crate::error::GAuthError;
use crate::types::SECRET_LEN;
use crate::utils::{
    base32_decode, base32_encode, base32_len, clear_spare_bits, is_encodable_len, normalize_secret,
};

/// Bytes of OS randomness fed into each stretched digest
const ENTROPY_POOL_LEN: usize = 8192;
/// Extra SHA-512 rounds over the previous digest
const STRETCH_ROUNDS: usize = 6;

/// A shared secret as presented to users: unpadded base32.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Secret(String);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>, GAuthError> {
        base32_decode(&self.0)
    }
}

impl FromStr for Secret {
    type Err = GAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(normalize_secret(s)?))
    }
}

impl TryFrom<String> for Secret {
    type Error = GAuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Secret> for String {
    fn from(value: Secret) -> Self {
        value.0
    }
}

impl AsRef<str> for Secret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fresh 16 character secret
pub fn generate_secret() -> Result<Secret, GAuthError> {
    generate_secret_with_len(SECRET_LEN)
}

pub fn generate_secret_with_len(len: usize) -> Result<Secret, GAuthError> {
    generate_secret_from(&mut OsRng, len)
}

pub(crate) fn generate_secret_from<R: RngCore>(rng: &mut R, len: usize) -> Result<Secret, GAuthError> {
    // a truncated encoding must still decode
    if len == 0 || !is_encodable_len(len) {
        return Err(GAuthError::InvalidSecretLength);
    }

    let mut material = stretched_digest(rng)?;
    while base32_len(material.len()) < len {
        material.extend(stretched_digest(rng)?);
    }

    let mut encoded = base32_encode(&material);
    encoded.truncate(len);
    clear_spare_bits(&mut encoded);
    log::debug!("generated a {} character secret", len);

    Ok(Secret(encoded))
}

fn stretched_digest<R: RngCore>(rng: &mut R) -> Result<Vec<u8>, GAuthError> {
    let mut pool = vec![0u8; ENTROPY_POOL_LEN];
    rng.try_fill_bytes(&mut pool).map_err(|e| {
        log::error!("failed to read system randomness: {}", e);
        GAuthError::RandomnessUnavailable
    })?;

    let mut digest = Sha512::digest(&pool);
    for _ in 0..STRETCH_ROUNDS {
        digest = Sha512::digest(&digest);
    }

    Ok(digest.to_vec())
}
