//! Check states and the final result entity

use std::fmt;
use std::fmt::Formatter;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// State of certificate, ordered by monitoring severity
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CheckState {
    /// Certificate satisfies the configured check
    Ok,
    /// Certificate is close to a threshold or differs from expectation
    Warning,
    /// Certificate is expired or inside the critical horizon
    Critical,
    /// Certificate could not be evaluated
    Unknown,
}

impl CheckState {
    /// Process exit code for monitoring systems: OK=0, WARNING=1,
    /// CRITICAL=2, UNKNOWN=3
    ///
    /// ```
    /// # use lcc::CheckState;
    /// assert_eq!(CheckState::Critical.exit_code(), 2);
    /// ```
    pub fn exit_code(self) -> i32 {
        match self {
            CheckState::Ok => 0,
            CheckState::Warning => 1,
            CheckState::Critical => 2,
            CheckState::Unknown => 3,
        }
    }
}

impl Default for CheckState {
    fn default() -> Self {
        CheckState::Unknown
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CheckState::Ok => write!(f, "OK"),
            CheckState::Warning => write!(f, "WARNING"),
            CheckState::Critical => write!(f, "CRITICAL"),
            CheckState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Check result
#[derive(Debug)]
pub struct CheckResult {
    /// State of certificate
    pub state: CheckState,
    /// One-line human-readable message
    pub message: String,
    /// When the check occurred in seconds since Unix epoch
    pub checked_at: i64,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Check result in JSON format
#[derive(Debug, Deserialize, Serialize)]
pub struct CheckResultJSON {
    /// State of certificate
    pub state: String,
    /// One-line human-readable message
    pub message: String,
    /// When the check occurred in RFC 3339 format
    pub checked_at: String,
}

impl CheckResultJSON {
    /// Convert a result to its JSON projection
    pub fn new(result: &CheckResult) -> CheckResultJSON {
        CheckResultJSON {
            state: result.state.to_string(),
            message: result.message.clone(),
            checked_at: Utc
                .timestamp_opt(result.checked_at, 0)
                .single()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CheckState::Ok.exit_code(), 0);
        assert_eq!(CheckState::Warning.exit_code(), 1);
        assert_eq!(CheckState::Critical.exit_code(), 2);
        assert_eq!(CheckState::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_display_state() {
        assert_eq!(CheckState::Ok.to_string(), "OK");
        assert_eq!(CheckState::Warning.to_string(), "WARNING");
        assert_eq!(CheckState::Critical.to_string(), "CRITICAL");
        assert_eq!(CheckState::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_display_result_is_message() {
        let result = CheckResult {
            state: CheckState::Ok,
            message: "certificate of cert.pem is valid".to_string(),
            checked_at: 0,
        };
        assert_eq!(result.to_string(), "certificate of cert.pem is valid");
    }

    #[test]
    fn test_json_projection() {
        let result = CheckResult {
            state: CheckState::Warning,
            message: "certificate of cert.pem will expire in 10 days".to_string(),
            checked_at: 1_893_499_200,
        };
        let json = CheckResultJSON::new(&result);
        assert_eq!(json.state, "WARNING");
        assert_eq!(json.message, result.message);
        assert_eq!(json.checked_at, "2030-01-01T12:00:00+00:00");
    }
}
