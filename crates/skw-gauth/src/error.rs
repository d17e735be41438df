use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GAuthError {
    #[error("GAuth: system randomness unavailable")]
    RandomnessUnavailable,
    #[error("GAuth: secret is not valid base32")]
    InvalidSecretEncoding,
    #[error("GAuth: no secret of this length decodes")]
    InvalidSecretLength,
    #[error("GAuth: verification window must be within 1..=1024")]
    InvalidWindow,
}
