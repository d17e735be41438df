//! Window search over moving factors.
//!
//! Every probe in the window is derived even after a match, so a failed
//! verification costs the same as a successful one.

use crate::error::GAuthError;
use crate::hotp::derive_code_raw;
use crate::types::{MovingFactor, Timestamp, MAX_WINDOW};
use crate::utils::{base32_decode, current_time_step, now_unix_seconds};

fn check_window(window: u64) -> Result<(), GAuthError> {
    if window == 0 || window > MAX_WINDOW {
        return Err(GAuthError::InvalidWindow);
    }
    Ok(())
}

/// Probe offsets for a time based window: `-(window/2) ..= window - window/2 - 1`.
pub fn time_window_offsets(window: u64) -> Result<std::ops::Range<i64>, GAuthError> {
    check_window(window)?;
    let window = i64::try_from(window).map_err(|_| GAuthError::InvalidWindow)?;
    let half = window / 2;

    Ok(-half..window - half)
}

/// Verify `code` against the current system time. See [`verify_time_based_at`].
pub fn verify_time_based(
    secret: &str,
    code: &str,
    window: u64,
) -> Result<Option<Timestamp>, GAuthError> {
    verify_time_based_at(secret, code, window, now_unix_seconds())
}

/// Returns the matching time step, or `None` when no step in the window
/// around `now` yields `code`.
pub fn verify_time_based_at(
    secret: &str,
    code: &str,
    window: u64,
    now: Timestamp,
) -> Result<Option<Timestamp>, GAuthError> {
    let offsets = time_window_offsets(window)?;
    let key = base32_decode(secret)?;
    let epoch = current_time_step(now);

    let mut matched = None;
    for offset in offsets {
        let step = epoch.wrapping_add(offset);
        let moving_factor = MovingFactor::from_time_step(step);
        log::trace!("probing time step {}", hex::encode(moving_factor.to_bytes()));

        if derive_code_raw(&key, moving_factor).matches(code) && matched.is_none() {
            matched = Some(step);
        }
    }

    match matched {
        Some(step) => log::debug!("code matched time step {} (offset {})", step, step.wrapping_sub(epoch)),
        None => log::debug!("no time step within window {} matched", window),
    }
    Ok(matched)
}

/// Returns the first counter in `counter + 1 ..= counter + window` that
/// yields `code`. `counter` itself is never accepted again.
///
/// Both verifiers accept windows in `1..=MAX_WINDOW`.
pub fn verify_counter_based(
    secret: &str,
    code: &str,
    counter: u64,
    window: u64,
) -> Result<Option<u64>, GAuthError> {
    check_window(window)?;
    let key = base32_decode(secret)?;

    let mut matched = None;
    for offset in 1..=window {
        // nothing lies ahead of u64::MAX
        let Some(candidate) = counter.checked_add(offset) else { break };
        let moving_factor = MovingFactor(candidate);
        log::trace!("probing counter {}", hex::encode(moving_factor.to_bytes()));

        if derive_code_raw(&key, moving_factor).matches(code) && matched.is_none() {
            matched = Some(candidate);
        }
    }

    match matched {
        Some(c) => log::debug!("code matched counter {}", c),
        None => log::debug!("no counter within window {} after {} matched", window, counter),
    }
    Ok(matched)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hotp::derive_code;

    const SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
    // step 1_000_000
    const NOW: Timestamp = 30_000_015;

    fn code_at(step: Timestamp) -> String {
        derive_code(SECRET, MovingFactor::from_time_step(step)).unwrap().to_string()
    }

    #[test]
    fn window_split() {
        assert_eq!(time_window_offsets(1).unwrap(), 0..1);
        assert_eq!(time_window_offsets(2).unwrap(), -1..1);
        assert_eq!(time_window_offsets(3).unwrap(), -1..2);
        assert_eq!(time_window_offsets(4).unwrap(), -2..2);
        assert_eq!(time_window_offsets(5).unwrap(), -2..3);
        assert_eq!(time_window_offsets(0), Err(GAuthError::InvalidWindow));
    }

    #[test]
    fn current_step_verifies() {
        let code = code_at(1_000_000);
        assert_eq!(verify_time_based_at(SECRET, &code, 3, NOW).unwrap(), Some(1_000_000));
    }

    #[test]
    fn drift_within_window() {
        assert_eq!(verify_time_based_at(SECRET, &code_at(999_999), 3, NOW).unwrap(), Some(999_999));
        assert_eq!(verify_time_based_at(SECRET, &code_at(1_000_001), 3, NOW).unwrap(), Some(1_000_001));
    }

    #[test]
    fn outside_window_is_not_found() {
        assert_eq!(verify_time_based_at(SECRET, &code_at(999_998), 3, NOW).unwrap(), None);
        assert_eq!(verify_time_based_at(SECRET, &code_at(1_000_002), 3, NOW).unwrap(), None);
        assert_eq!(verify_time_based_at(SECRET, &code_at(1_000_010), 3, NOW).unwrap(), None);
    }

    #[test]
    fn even_window_favors_the_past() {
        assert_eq!(verify_time_based_at(SECRET, &code_at(999_998), 4, NOW).unwrap(), Some(999_998));
        assert_eq!(verify_time_based_at(SECRET, &code_at(1_000_002), 4, NOW).unwrap(), None);
    }

    #[test]
    fn window_of_one_is_exact() {
        assert_eq!(verify_time_based_at(SECRET, &code_at(1_000_000), 1, NOW).unwrap(), Some(1_000_000));
        assert_eq!(verify_time_based_at(SECRET, &code_at(999_999), 1, NOW).unwrap(), None);
    }

    #[test]
    fn live_clock() {
        let code = derive_code(
            SECRET,
            MovingFactor::from_time_step(current_time_step(now_unix_seconds())),
        ).unwrap();
        // window 3 tolerates a step boundary between the two clock reads
        assert!(verify_time_based(SECRET, code.as_str(), 3).unwrap().is_some());
    }

    #[test]
    fn malformed_code_is_not_found() {
        assert_eq!(verify_time_based_at(SECRET, "12345", 3, NOW).unwrap(), None);
        assert_eq!(verify_time_based_at(SECRET, "abcdef", 3, NOW).unwrap(), None);
    }

    #[test]
    fn bad_secret_is_an_error_not_a_miss() {
        assert_eq!(verify_time_based_at("0000", "755224", 3, NOW), Err(GAuthError::InvalidSecretEncoding));
        assert_eq!(verify_counter_based("0000", "755224", 0, 3), Err(GAuthError::InvalidSecretEncoding));
    }

    #[test]
    fn counter_looks_ahead() {
        // counter 1 -> 287082, counter 2 -> 359152
        assert_eq!(verify_counter_based(SECRET, "287082", 0, 3).unwrap(), Some(1));
        assert_eq!(verify_counter_based(SECRET, "359152", 0, 3).unwrap(), Some(2));
        assert_eq!(verify_counter_based(SECRET, "969429", 0, 3).unwrap(), Some(3));
        assert_eq!(verify_counter_based(SECRET, "338314", 0, 3).unwrap(), None);
    }

    #[test]
    fn counter_never_replays() {
        assert_eq!(verify_counter_based(SECRET, "755224", 0, 10).unwrap(), None);
        assert_eq!(verify_counter_based(SECRET, "287082", 1, 10).unwrap(), None);
    }

    #[test]
    fn counter_at_the_end_of_range() {
        assert_eq!(verify_counter_based(SECRET, "755224", u64::MAX, 3).unwrap(), None);
        assert_eq!(verify_counter_based(SECRET, "755224", 0, 0), Err(GAuthError::InvalidWindow));
    }

    #[test]
    fn window_is_bounded() {
        assert_eq!(time_window_offsets(MAX_WINDOW + 1), Err(GAuthError::InvalidWindow));
        assert_eq!(time_window_offsets(u64::MAX), Err(GAuthError::InvalidWindow));
        assert_eq!(verify_time_based_at(SECRET, "755224", u64::MAX, NOW), Err(GAuthError::InvalidWindow));
        assert_eq!(verify_counter_based(SECRET, "755224", 0, u64::MAX), Err(GAuthError::InvalidWindow));

        // the largest window still searches, and finds counter 9
        assert_eq!(verify_counter_based(SECRET, "520489", 0, MAX_WINDOW).unwrap(), Some(9));
        assert_eq!(time_window_offsets(MAX_WINDOW).unwrap(), -512..512);
    }
}
