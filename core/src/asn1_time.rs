//! ASN.1 time decoding

use chrono::{LocalResult, TimeZone, Utc};
use thiserror::Error;

/// An absolute point in time, UTC, in seconds since the Unix epoch
pub type Instant = i64;

/// An ASN.1 time string matches none of the known layouts or has
/// out-of-range fields
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid ASN.1 time {0:?}")]
pub struct TimeFormatError(pub String);

/// Decode an ASN.1 generalized/UTC time string into an [`Instant`]
///
/// Three layouts are recognized: `YYYYMMDDHHMMSSZ`,
/// `YYYYMMDDHHMMSS+HHMM` and `YYYYMMDDHHMMSS-HHMM`.
///
/// ```
/// # use lcc::asn1_time::decode;
/// assert_eq!(decode("19700101000000Z").unwrap(), 0);
/// ```
pub fn decode(s: &str) -> Result<Instant, TimeFormatError> {
    let err = || TimeFormatError(s.to_string());

    if !s.is_ascii() {
        return Err(err());
    }
    match (s.len(), s.as_bytes()) {
        (15, bytes) if bytes[14] == b'Z' => decode_calendar(&s[..14]).ok_or_else(err),
        (19, bytes) if bytes[14] == b'+' || bytes[14] == b'-' => {
            let naive = decode_calendar(&s[..14]).ok_or_else(err)?;
            let offset = decode_offset(&s[15..]).ok_or_else(err)?;
            // "+HHMM" means local time is ahead of UTC
            if bytes[14] == b'+' {
                Ok(naive - offset)
            } else {
                Ok(naive + offset)
            }
        }
        _ => Err(err()),
    }
}

/// Interpret 14 digits of calendar fields as a UTC timestamp. Range
/// validation of the date fields is delegated to chrono, which never
/// consults the process-local timezone for `Utc`.
fn decode_calendar(s: &str) -> Option<Instant> {
    let year = parse_digits(&s[0..4])?;
    let month = parse_digits(&s[4..6])? as u32;
    let day = parse_digits(&s[6..8])? as u32;
    let hour = parse_digits(&s[8..10])? as u32;
    let minute = parse_digits(&s[10..12])? as u32;
    let second = parse_digits(&s[12..14])? as u32;

    match Utc.with_ymd_and_hms(year as i32, month, day, hour, minute, second) {
        LocalResult::Single(t) => Some(t.timestamp()),
        _ => None,
    }
}

/// `HHMM` offset in seconds, rejecting offsets of 24 hours or more
fn decode_offset(s: &str) -> Option<i64> {
    let hours = parse_digits(&s[0..2])?;
    let minutes = parse_digits(&s[2..4])?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 3600 + minutes * 60)
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
