#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! Local Certificate Check

pub use asn1_time::{decode, Instant, TimeFormatError};
pub use cert::{
    format_issuer, read_signature_algorithm, Certificate, IssuerUnavailableError,
    SignatureAlgorithmUnavailableError,
};
pub use check_result::{CheckResult, CheckResultJSON, CheckState};
pub use checker::{CheckParams, Checker, ExpirationThresholds, SignatureAlgorithmSet};
pub use validity::{check_validity, seconds_until_expiration, ValiditySignal};

pub mod asn1_time;
pub mod cert;
pub mod check_result;
pub mod checker;
pub mod validity;
