use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// Digits kept from the sub-second fraction (10 µs resolution).
const FRACTION_DIGITS: u32 = 5;

static LAST_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Generate a caller-side message id from the current time.
///
/// The token is the integer seconds followed by the first five digits of the
/// sub-second fraction. Tokens handed out by one process are strictly increasing,
/// so two calls never return the same value even within one clock tick. Across
/// processes this is best effort; supply your own id when strict uniqueness matters.
pub fn generate_message_id() -> String {
    next_token(time_token(Utc::now())).to_string()
}

fn time_token(now: DateTime<Utc>) -> u64 {
    let seconds = u64::try_from(now.timestamp()).unwrap_or_default();
    let fraction = u64::from(now.timestamp_subsec_nanos() / 10_000);
    seconds * 10_u64.pow(FRACTION_DIGITS) + fraction
}

fn next_token(candidate: u64) -> u64 {
    let mut last = LAST_TOKEN.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(last + 1);
        match LAST_TOKEN.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn time_token_concatenates_seconds_and_fraction() {
        let now = Utc
            .timestamp_opt(1_409_770_256, 123_456_789)
            .single()
            .unwrap();
        assert_eq!(time_token(now), 140_977_025_612_345);
    }

    #[test]
    fn time_token_zero_pads_fraction() {
        let now = Utc.timestamp_opt(1_409_770_256, 50_000).single().unwrap();
        assert_eq!(time_token(now).to_string(), "140977025600005");
    }

    #[test]
    fn generated_ids_are_numeric() {
        let id = generate_message_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()), "got {id}");
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let ids = (0..1_000)
            .map(|_| generate_message_id())
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn next_token_never_goes_backwards() {
        let first = next_token(time_token(Utc::now()) + 1_000);
        let second = next_token(1);
        assert!(second > first);
    }
}
