//! Field validators for edit forms
//!
//! Each validator takes the raw text a user typed and returns the canonical
//! wire form, or `None` if the text is not acceptable for that type.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Standard alphabet, padding optional on decode
const BLOB_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parse a timestamp
///
/// Accepts RFC3339 (any offset), or a naive `YYYY-MM-DDTHH:MM:SS[.f]` /
/// `YYYY-MM-DD` which is taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Canonical RFC3339 rendering: UTC, `Z` suffix, fraction without trailing zeros
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = dt.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('Z');
    out
}

/// Validate a timestamp, returning its wire text
///
/// RFC3339 text already in UTC (`...T...Z`) is returned as typed, so the
/// fraction digits a server sent survive an edit. Offsets and naive forms
/// are converted with [`format_timestamp`].
pub fn canonical_timestamp(text: &str) -> Option<String> {
    let text = text.trim();
    let dt = parse_timestamp(text)?;
    if is_utc_rfc3339(text) {
        return Some(text.to_string());
    }
    Some(format_timestamp(&dt))
}

fn is_utc_rfc3339(text: &str) -> bool {
    text.as_bytes().get(10) == Some(&b'T')
        && text.ends_with('Z')
        && DateTime::parse_from_rfc3339(text).is_ok()
}

/// Parse a double; surrounding whitespace is ignored and empty text is 0
///
/// `NaN` is rejected.
pub fn parse_double(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|f| !f.is_nan())
}

/// Validate an integer: unsigned decimal digits only
///
/// A leading sign is rejected, so negative integers can be displayed but not
/// entered.
pub fn parse_integer(text: &str) -> Option<String> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        Some(text.to_string())
    } else {
        None
    }
}

/// Decode standard-alphabet base64; trailing `=` padding is optional
pub fn decode_blob(text: &str) -> Option<Vec<u8>> {
    BLOB_ENGINE.decode(text).ok()
}
