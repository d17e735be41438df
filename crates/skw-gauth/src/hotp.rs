//! HOTP derivation, RFC 4226 section 5.3

use hmacsha1::hmac_sha1;

use crate::code::OtpCode;
use crate::error::GAuthError;
use crate::types::{MovingFactor, Timestamp};
use crate::utils::{base32_decode, current_time_step};

/// Derive the code of a base32 `secret` at `moving_factor`.
///
/// Whitespace in the secret is ignored. A secret that does not decode
/// fails with [`GAuthError::InvalidSecretEncoding`] instead of hashing
/// a partial key.
pub fn derive_code(secret: &str, moving_factor: MovingFactor) -> Result<OtpCode, GAuthError> {
    let key = base32_decode(secret).map_err(|e| {
        log::warn!("refusing to derive a code from an undecodable secret");
        e
    })?;

    Ok(derive_code_raw(&key, moving_factor))
}

/// Derive from an already decoded key
pub fn derive_code_raw(key: &[u8], moving_factor: MovingFactor) -> OtpCode {
    let hash = hmac_sha1(key, &moving_factor.to_bytes());

    // dynamic truncation
    let offset = (hash[hash.len() - 1] & 0x0F) as usize;
    let mut truncated_hash: [u8; 4] = Default::default();
    truncated_hash.copy_from_slice(&hash[offset..offset + 4]);

    let code = u32::from_be_bytes(truncated_hash) & 0x7FFF_FFFF;
    OtpCode::from_truncated(code)
}

/// TOTP code for the 30 second step containing `now`
pub fn derive_time_based_code(secret: &str, now: Timestamp) -> Result<OtpCode, GAuthError> {
    derive_code(secret, MovingFactor::from_time_step(current_time_step(now)))
}
