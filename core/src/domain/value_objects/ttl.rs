//! Time-to-live parsing for `policy.expiredOn`.
//!
//! Two notations are accepted:
//! - clock style `[-|+][D(.| )]HH:MM[:SS[.fff]]`, e.g. `00:01:00`, `1.02:00:00`
//! - ISO-8601 durations `P[nY][nM][nW][nD][T[nH][nM][n[.f]S]]`, e.g. `PT5M`, `P1DT2H`
//!
//! A month is 146097/4800 days (2 629 746 s) and a year twelve months, the
//! average Gregorian lengths. Fractional seconds are truncated. A result of
//! zero or less is rejected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

const FIELD: &str = "policy.expiredOn";

const MONTH_SECONDS: u64 = 2_629_746;
const YEAR_SECONDS: u64 = 12 * MONTH_SECONDS;

static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+])?(?:(\d+)[. ])?(\d+):(\d+)(?::(\d+)(?:\.\d*)?)?$").unwrap()
});

static ISO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([-+])?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,]\d+)?S)?)?$",
    )
    .unwrap()
});

/// Parses a duration string into a strictly positive number of seconds
pub fn parse_ttl(value: &str) -> Result<u64, ValidationError> {
    let value = value.trim();
    let invalid = || ValidationError::InvalidDuration {
        field: FIELD.to_string(),
        value: value.to_string(),
    };

    let (negative, seconds) = if let Some(caps) = CLOCK_REGEX.captures(value) {
        let parts = [
            (caps.get(2), 86_400),
            (caps.get(3), 3_600),
            (caps.get(4), 60),
            (caps.get(5), 1),
        ];
        (caps.get(1).map(|m| m.as_str()) == Some("-"), sum_parts(&parts).ok_or_else(invalid)?)
    } else if let Some(caps) = ISO_REGEX.captures(value) {
        // A bare "P" or "PT" carries no component at all
        if (2..=8).all(|i| caps.get(i).is_none()) {
            return Err(invalid());
        }
        let parts = [
            (caps.get(2), YEAR_SECONDS),
            (caps.get(3), MONTH_SECONDS),
            (caps.get(4), 604_800),
            (caps.get(5), 86_400),
            (caps.get(6), 3_600),
            (caps.get(7), 60),
            (caps.get(8), 1),
        ];
        (caps.get(1).map(|m| m.as_str()) == Some("-"), sum_parts(&parts).ok_or_else(invalid)?)
    } else {
        return Err(invalid());
    };

    if negative || seconds == 0 {
        return Err(ValidationError::NonPositiveDuration {
            field: FIELD.to_string(),
        });
    }
    if seconds > i64::MAX as u64 {
        return Err(invalid());
    }

    Ok(seconds)
}

fn sum_parts(parts: &[(Option<regex::Match<'_>>, u64)]) -> Option<u64> {
    parts.iter().try_fold(0u64, |total, (part, unit)| match part {
        Some(m) => m
            .as_str()
            .parse::<u64>()
            .ok()?
            .checked_mul(*unit)?
            .checked_add(total),
        None => Some(total),
    })
}
