pub mod types;
pub mod error;
pub mod utils;

pub mod code;
pub mod secret;
pub mod hotp;
pub mod verify;
pub mod uri;
pub mod listing;

// re-exports
pub use error::GAuthError;
pub use types::{MovingFactor, Timestamp, CODE_LEN, DEFAULT_WINDOW, MAX_WINDOW, SECRET_LEN, TIME_STEP};
pub use code::OtpCode;
pub use secret::{Secret, generate_secret, generate_secret_with_len};
pub use hotp::{derive_code, derive_code_raw, derive_time_based_code};
pub use verify::{verify_time_based, verify_time_based_at, verify_counter_based};
pub use uri::{build_otpauth_uri, build_barcode_url};
pub use listing::{Credential, CodeEntry, list_codes};
pub use utils::{current_time_step, now_unix_seconds, remaining_lifetime};
