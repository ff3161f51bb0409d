//! Time-window resolution for the `updated:` search qualifier.
//!
//! A window is anchored either on an explicit `--since` timestamp or on
//! "now" shifted by a signed offset such as `-48h` or `-1h30m`.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ReportError;
use crate::util::{SINCE_FORMAT_HINT, format_timestamp};

/// Default relative offset: the last two days.
pub const DEFAULT_OFFSET: &str = "-48h";

/// Resolved lower bound of the time window plus its search-query encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    lower_bound: DateTime<Utc>,
    representation: String,
}

impl TimeRange {
    /// Window covering everything updated at or after `lower_bound`.
    pub fn starting_at(lower_bound: DateTime<Utc>) -> Self {
        let representation = format!("{}..*", format_timestamp(&lower_bound));
        Self {
            lower_bound,
            representation,
        }
    }

    pub fn lower_bound(&self) -> DateTime<Utc> {
        self.lower_bound
    }

    /// Search-range encoding, e.g. `2023-01-01T00:00:00+00:00..*`.
    pub fn representation(&self) -> &str {
        &self.representation
    }
}

/// Resolve the time window.
///
/// A non-empty `since` wins and `offset` is not consulted at all. Otherwise
/// the lower bound is `now + offset`.
pub fn resolve(since: &str, offset: &str, now: DateTime<Utc>) -> Result<TimeRange, ReportError> {
    let since = since.trim();
    if !since.is_empty() {
        let parsed =
            DateTime::parse_from_rfc3339(since).map_err(|_| ReportError::InvalidTimeFormat {
                value: since.to_owned(),
                expected: SINCE_FORMAT_HINT,
            })?;
        return Ok(TimeRange::starting_at(parsed.with_timezone(&Utc)));
    }

    let delta = parse_offset(offset)?;
    let lower_bound = now
        .checked_add_signed(delta)
        .ok_or_else(|| ReportError::InvalidDuration {
            value: offset.to_owned(),
            reason: "offset moves the window out of the representable time range".to_owned(),
        })?;
    Ok(TimeRange::starting_at(lower_bound))
}

/// Parse a signed duration such as `-48h`, `+30m`, `1h30m` or `1.5h`.
///
/// Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`, `d` (24h) and `w` (7d).
/// A bare `0` is accepted; any other number needs a unit.
pub fn parse_offset(input: &str) -> Result<TimeDelta, ReportError> {
    let invalid = |reason: &str| ReportError::InvalidDuration {
        value: input.to_owned(),
        reason: reason.to_owned(),
    };

    let s = input.trim();
    let (negative, mut rest) = if let Some(r) = s.strip_prefix('-') {
        (true, r)
    } else if let Some(r) = s.strip_prefix('+') {
        (false, r)
    } else {
        (false, s)
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let number = &rest[..num_end];
        if !number.bytes().any(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a number"));
        }
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let per_unit = unit_nanos(unit).ok_or_else(|| {
            invalid(&format!(
                "unknown unit {unit:?}; valid units: ns, us, ms, s, m, h, d, w"
            ))
        })?;
        let nanos = scale(number, per_unit).ok_or_else(|| invalid("malformed number"))?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| invalid("duration overflows"))?;
    }

    let nanos = i64::try_from(total).map_err(|_| invalid("duration overflows"))?;
    Ok(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

fn unit_nanos(unit: &str) -> Option<i128> {
    const SECOND: i128 = 1_000_000_000;
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => SECOND,
        "m" => 60 * SECOND,
        "h" => 3_600 * SECOND,
        "d" => 86_400 * SECOND,
        "w" => 7 * 86_400 * SECOND,
        _ => return None,
    })
}

/// Multiply a decimal literal (`"12"`, `"1.5"`, `".25"`) by `per_unit`
/// nanoseconds without going through floating point.
fn scale(number: &str, per_unit: i128) -> Option<i128> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if frac_part.contains('.') {
        return None;
    }
    let int_value: i128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut nanos = int_value.checked_mul(per_unit)?;

    // Digits beyond nanosecond precision cannot change the result.
    let frac_part = &frac_part[..frac_part.len().min(18)];
    if !frac_part.is_empty() {
        let frac_value: i128 = frac_part.parse().ok()?;
        let denominator = 10_i128.pow(u32::try_from(frac_part.len()).ok()?);
        nanos = nanos.checked_add(frac_value.checked_mul(per_unit)? / denominator)?;
    }
    Some(nanos)
}
