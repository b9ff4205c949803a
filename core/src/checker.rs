//! Decision engine turning a decoded certificate plus check
//! parameters into a single [`CheckResult`]

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use log::debug;
use num_format::{Locale, ToFormattedString};

use crate::asn1_time::{decode, Instant, TimeFormatError};
use crate::cert::{format_issuer, read_signature_algorithm, Certificate};
use crate::check_result::{CheckResult, CheckState};
use crate::validity::{
    check_validity, days_ceil, days_floor, seconds_until_expiration, ValiditySignal,
};

/// Expiration horizon in seconds, `warning >= critical > 0`
#[derive(Clone, Copy, Debug)]
pub struct ExpirationThresholds {
    /// Remaining seconds at or below which the state is WARNING
    pub warning: i64,
    /// Remaining seconds at or below which the state is CRITICAL
    pub critical: i64,
}

impl ExpirationThresholds {
    /// Build thresholds from user-facing day counts, or `None` when
    /// the invariant `warning >= critical > 0` does not hold
    pub fn from_days(warning: i64, critical: i64) -> Option<Self> {
        if warning >= critical && critical > 0 {
            Some(ExpirationThresholds {
                warning: warning * 86_400,
                critical: critical * 86_400,
            })
        } else {
            None
        }
    }
}

/// Allowed signature-algorithm names, lower-cased and deduplicated.
/// Case normalization for algorithm matching lives here and nowhere
/// else.
#[derive(Clone, Debug)]
pub struct SignatureAlgorithmSet(HashSet<String>);

impl SignatureAlgorithmSet {
    /// Build the set from user input, or `None` when no non-empty
    /// name remains after trimming
    pub fn new<I, T>(algorithms: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let set: HashSet<String> = algorithms
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        if set.is_empty() {
            None
        } else {
            Some(SignatureAlgorithmSet(set))
        }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, algorithm: &str) -> bool {
        self.0.contains(&algorithm.trim().to_lowercase())
    }
}

/// Parameters of one check invocation. At most one mode applies;
/// `check` picks the first configured one in declaration order.
#[derive(Clone, Debug, Default)]
pub struct CheckParams {
    /// Expiration mode
    pub thresholds: Option<ExpirationThresholds>,
    /// Signature-algorithm mode
    pub signature_algorithms: Option<SignatureAlgorithmSet>,
    /// Issuer mode, expected distinguished name
    pub issuer: Option<String>,
}

/// Checker for a local certificate
#[derive(Clone, Copy, Debug)]
pub struct Checker {
    /// When the check occurs in seconds since Unix epoch, sampled
    /// once and reused for every sub-check of one invocation
    pub checked_at: i64,
}

impl Default for Checker {
    fn default() -> Checker {
        Checker {
            checked_at: Utc::now().timestamp(),
        }
    }
}

impl Checker {
    /// Evaluate one certificate against one set of parameters
    ///
    /// Mode priority: expiration, signature algorithm, issuer, plain
    /// validity. Every decode or extraction failure is converted into
    /// an UNKNOWN result here; no error escapes to the caller.
    pub fn check<C>(&self, source: &str, cert: &C, params: &CheckParams) -> CheckResult
    where
        C: Certificate,
    {
        let (state, message) = if let Some(thresholds) = &params.thresholds {
            debug!("check expiration of {source}");
            self.check_expiration(source, cert, thresholds)
        } else if let Some(algorithms) = &params.signature_algorithms {
            debug!("check signature algorithm of {source}");
            self.check_signature_algorithm(source, cert, algorithms)
        } else if let Some(issuer) = &params.issuer {
            debug!("check issuer of {source}");
            self.check_issuer(source, cert, issuer)
        } else {
            debug!("check validity of {source}");
            self.check_plain_validity(source, cert)
        };
        CheckResult {
            state,
            message,
            checked_at: self.checked_at,
        }
    }

    fn check_expiration<C>(
        &self,
        source: &str,
        cert: &C,
        thresholds: &ExpirationThresholds,
    ) -> (CheckState, String)
    where
        C: Certificate,
    {
        let (not_before, not_after) = match decode_window(cert) {
            Ok(window) => window,
            Err(_) => return unknown_validity(source),
        };
        match check_validity(not_before, not_after, self.checked_at) {
            ValiditySignal::NotYetValid(seconds) => not_yet_valid(source, seconds),
            ValiditySignal::Expired(seconds) => expired(source, seconds),
            ValiditySignal::Valid => {
                let remaining = seconds_until_expiration(not_after, self.checked_at);
                let state = if remaining <= thresholds.critical {
                    CheckState::Critical
                } else if remaining <= thresholds.warning {
                    CheckState::Warning
                } else {
                    CheckState::Ok
                };
                let days = days_floor(remaining).to_formatted_string(&Locale::en);
                let message = format!(
                    "certificate of {source} will expire in {days} days ({})",
                    timestamp_rfc3339(not_after)
                );
                (state, message)
            }
        }
    }

    fn check_signature_algorithm<C>(
        &self,
        source: &str,
        cert: &C,
        algorithms: &SignatureAlgorithmSet,
    ) -> (CheckState, String)
    where
        C: Certificate,
    {
        let algorithm = match read_signature_algorithm(cert) {
            Ok(a) => a,
            Err(_) => {
                return (
                    CheckState::Unknown,
                    format!("can't get signature algorithm of {source}"),
                )
            }
        };
        // a foreign algorithm is a warning, not an outage
        let state = if algorithms.contains(&algorithm) {
            CheckState::Ok
        } else {
            CheckState::Warning
        };
        let message = format!("certificate of {source} is signed with {algorithm}");
        (state, message)
    }

    fn check_issuer<C>(&self, source: &str, cert: &C, expected: &str) -> (CheckState, String)
    where
        C: Certificate,
    {
        let actual = match format_issuer(cert) {
            Ok(i) => i,
            Err(_) => {
                return (
                    CheckState::Unknown,
                    format!("can't get issuer of {source}"),
                )
            }
        };
        // trim incidental whitespace; the comparison itself stays
        // exact and case-sensitive
        if actual.trim() == expected.trim() {
            (
                CheckState::Ok,
                format!("certificate of {source} is issued by {actual}"),
            )
        } else {
            (
                CheckState::Warning,
                format!(
                    "certificate of {source} is issued by {actual}, expected {}",
                    expected.trim()
                ),
            )
        }
    }

    fn check_plain_validity<C>(&self, source: &str, cert: &C) -> (CheckState, String)
    where
        C: Certificate,
    {
        let (not_before, not_after) = match decode_window(cert) {
            Ok(window) => window,
            Err(_) => return unknown_validity(source),
        };
        match check_validity(not_before, not_after, self.checked_at) {
            ValiditySignal::NotYetValid(seconds) => not_yet_valid(source, seconds),
            ValiditySignal::Expired(seconds) => expired(source, seconds),
            ValiditySignal::Valid => (
                CheckState::Ok,
                format!("certificate of {source} is valid"),
            ),
        }
    }
}

fn decode_window<C>(cert: &C) -> Result<(Instant, Instant), TimeFormatError>
where
    C: Certificate,
{
    let not_before = decode(cert.not_before())?;
    let not_after = decode(cert.not_after())?;
    Ok((not_before, not_after))
}

fn unknown_validity(source: &str) -> (CheckState, String) {
    (
        CheckState::Unknown,
        format!("can't get validity period of {source}"),
    )
}

fn not_yet_valid(source: &str, seconds: i64) -> (CheckState, String) {
    let days = days_ceil(seconds).to_formatted_string(&Locale::en);
    (
        CheckState::Warning,
        format!("certificate of {source} will be valid in {days} days"),
    )
}

fn expired(source: &str, seconds: i64) -> (CheckState, String) {
    let days = days_floor(seconds).to_formatted_string(&Locale::en);
    (
        CheckState::Critical,
        format!("certificate of {source} expired {days} days ago"),
    )
}

fn timestamp_rfc3339(t: Instant) -> String {
    Utc.timestamp_opt(t, 0)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}
