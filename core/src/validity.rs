//! Validity window and expiration arithmetic

use crate::asn1_time::Instant;

/// Where `now` falls relative to a certificate's validity window
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValiditySignal {
    /// `now` is at or before `notBefore`; seconds until the window opens
    NotYetValid(i64),
    /// `now` is strictly inside the validity window
    Valid,
    /// `now` is at or after `notAfter`; seconds since the window closed
    Expired(i64),
}

/// Classify `now` against the validity window
///
/// Validity is a strictly open interval: the boundary instants
/// themselves resolve to `NotYetValid` and `Expired`. The three
/// variants are exhaustive for any `not_before < not_after`.
pub fn check_validity(not_before: Instant, not_after: Instant, now: Instant) -> ValiditySignal {
    if not_before < now && now < not_after {
        ValiditySignal::Valid
    } else if now <= not_before {
        ValiditySignal::NotYetValid(not_before - now)
    } else {
        ValiditySignal::Expired(now - not_after)
    }
}

/// Seconds remaining until `not_after`, negative when already expired
pub fn seconds_until_expiration(not_after: Instant, now: Instant) -> i64 {
    not_after - now
}

/// Seconds to whole days, rounded up. Used for "not yet valid"
/// magnitudes so a near-future certificate is never reported as 0 days.
pub(crate) fn days_ceil(seconds: i64) -> i64 {
    (seconds + 86_399) / 86_400
}

/// Seconds to whole days, truncated. Used for expired/remaining
/// magnitudes so partial days are not overstated.
pub(crate) fn days_floor(seconds: i64) -> i64 {
    seconds / 86_400
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_check_validity_inside_window() {
        assert_eq!(check_validity(100, 200, 150), ValiditySignal::Valid);
    }

    #[test]
    fn test_check_validity_before_window() {
        assert_eq!(check_validity(100, 200, 40), ValiditySignal::NotYetValid(60));
    }

    #[test]
    fn test_check_validity_after_window() {
        assert_eq!(check_validity(100, 200, 260), ValiditySignal::Expired(60));
    }

    #[test]
    fn test_check_validity_boundaries_are_not_valid() {
        assert_eq!(check_validity(100, 200, 100), ValiditySignal::NotYetValid(0));
        assert_eq!(check_validity(100, 200, 200), ValiditySignal::Expired(0));
    }

    #[test]
    fn test_check_validity_exhaustive() {
        for now in 0..300 {
            let signal = check_validity(100, 200, now);
            match signal {
                ValiditySignal::NotYetValid(s) => assert_eq!(s, 100 - now),
                ValiditySignal::Valid => assert!(100 < now && now < 200),
                ValiditySignal::Expired(s) => assert_eq!(s, now - 200),
            }
        }
    }

    #[test]
    fn test_seconds_until_expiration() {
        assert_eq!(seconds_until_expiration(200, 150), 50);
        assert_eq!(seconds_until_expiration(200, 260), -60);
    }

    #[test]
    fn test_days_ceil() {
        assert_eq!(days_ceil(0), 0);
        assert_eq!(days_ceil(1), 1);
        assert_eq!(days_ceil(86_400), 1);
        assert_eq!(days_ceil(86_401), 2);
    }

    #[test]
    fn test_days_floor() {
        assert_eq!(days_floor(86_399), 0);
        assert_eq!(days_floor(86_400), 1);
        assert_eq!(days_floor(172_799), 1);
    }
}
