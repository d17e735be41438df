use serde::{Serialize, Deserialize};

pub const CODE_LEN: usize = 6;
pub const CODE_MODULUS: u32 = 1_000_000;

/// Length of a freshly generated secret, in base32 characters
pub const SECRET_LEN: usize = 16;

/// TOTP time step in seconds, default by GA
pub const TIME_STEP: Timestamp = 30;

pub const DEFAULT_WINDOW: u64 = 3;
/// Every probe in a window costs one HMAC, even after a match
pub const MAX_WINDOW: u64 = 1024;

pub type Timestamp = i64;

/// HOTP moving factor. Serialized as exactly 8 big-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct MovingFactor(pub u64);

impl MovingFactor {
    /// Time steps before the epoch wrap around the same way a u64 cast would.
    pub fn from_time_step(step: Timestamp) -> Self {
        Self(step as u64)
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for MovingFactor {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
