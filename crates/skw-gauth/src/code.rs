use std::fmt;
use serde::{Serialize, Deserialize};
use subtle::ConstantTimeEq;

use crate::types::{CODE_LEN, CODE_MODULUS};

/// Six zero-padded ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    pub(crate) fn from_truncated(value: u32) -> Self {
        Self(format!("{:0width$}", value % CODE_MODULUS, width = CODE_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant time against the supplied code. A code of any other
    /// length never matches.
    pub fn matches(&self, code: &str) -> bool {
        let expected = self.0.as_bytes();
        let supplied = code.as_bytes();

        expected.len() == supplied.len() && bool::from(expected.ct_eq(supplied))
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
