use std::time::{SystemTime, UNIX_EPOCH};
use crate::types::{Timestamp, TIME_STEP};
use crate::error::GAuthError;

const ALPHABET: base32::Alphabet = base32::Alphabet::RFC4648 { padding: false };

const SYMBOLS: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn symbol_value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'2'..=b'7' => Some(c - b'2' + 26),
        _ => None,
    }
}

/// `=` count that completes `len % 8` symbols to a full block, `None`
/// for remainders no byte string encodes to.
fn padding_len(remainder: usize) -> Option<usize> {
    match remainder {
        0 => Some(0),
        2 => Some(6),
        4 => Some(4),
        5 => Some(3),
        7 => Some(1),
        _ => None,
    }
}

/// Bits of the last symbol that fall past the last whole byte
fn spare_bits(len: usize) -> usize {
    len * 5 % 8
}

/// Strip whitespace and padding, leaving the canonical unpadded form.
///
/// Rejected: symbols outside `A-Z2-7`, a length no byte string encodes
/// to, padding that is present but not exactly the block remainder, and
/// a last symbol whose spare bits are not zero.
pub fn normalize_secret(secret: &str) -> Result<String, GAuthError> {
    let token: String = secret.chars().filter(|c| !c.is_whitespace()).collect();
    let data = token.trim_end_matches('=');
    let padding = token.len() - data.len();

    let expected_padding = padding_len(data.len() % 8).ok_or(GAuthError::InvalidSecretEncoding)?;
    if data.is_empty() || (padding != 0 && padding != expected_padding) {
        return Err(GAuthError::InvalidSecretEncoding);
    }

    let values = data.bytes()
        .map(symbol_value)
        .collect::<Option<Vec<u8>>>()
        .ok_or(GAuthError::InvalidSecretEncoding)?;

    let mask = (1u8 << spare_bits(data.len())) - 1;
    if values.last().map_or(false, |last| last & mask != 0) {
        return Err(GAuthError::InvalidSecretEncoding);
    }

    Ok(data.to_string())
}

/// Zero the spare bits of a truncated encoding so it decodes canonically.
pub(crate) fn clear_spare_bits(token: &mut String) {
    let mask = (1u8 << spare_bits(token.len())) - 1;
    if mask == 0 {
        return;
    }
    if let Some(value) = token.pop().and_then(|c| u8::try_from(c).ok()).and_then(symbol_value) {
        token.push(SYMBOLS[usize::from(value & !mask)] as char);
    }
}

/// Whether a truncated encoding of `len` symbols can be decoded at all
pub(crate) fn is_encodable_len(len: usize) -> bool {
    padding_len(len % 8).is_some()
}

pub fn base32_decode(secret: &str) -> Result<Vec<u8>, GAuthError> {
    let token = normalize_secret(secret)?;
    base32::decode(ALPHABET, &token).ok_or(GAuthError::InvalidSecretEncoding)
}

/// Unpadded RFC 4648 encoding
pub fn base32_encode(bytes: &[u8]) -> String {
    base32::encode(ALPHABET, bytes)
}

/// Unpadded base32 length of `n` bytes
pub fn base32_len(n: usize) -> usize {
    (n * 8 + 4) / 5
}

pub fn now_unix_seconds() -> Timestamp {
    unix_seconds(SystemTime::now())
}

/// Whole seconds since the epoch, rounded down. A clock set before 1970
/// gives a negative value.
pub fn unix_seconds(time: SystemTime) -> Timestamp {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => Timestamp::try_from(d.as_secs()).unwrap_or(Timestamp::MAX),
        Err(e) => {
            let d = e.duration();
            log::warn!("system clock is {:?} before the unix epoch", d);
            let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
            Timestamp::try_from(secs).map(|s| -s).unwrap_or(Timestamp::MIN)
        },
    }
}

/// `floor(now / 30)`
pub fn current_time_step(now: Timestamp) -> Timestamp {
    now.div_euclid(TIME_STEP)
}

/// Seconds until the code of the current step expires, in `1..=30`.
pub fn remaining_lifetime(now: Timestamp) -> Timestamp {
    TIME_STEP - now.rem_euclid(TIME_STEP)
}
