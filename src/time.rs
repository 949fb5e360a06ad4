use hifitime::{Duration, Epoch, Unit};
use std::str::FromStr;

use crate::constants::{Years, JULIAN_YEAR_DAYS, REFERENCE_EPOCH_YMD, SECONDS_PER_DAY};
use crate::intercept_errors::InterceptError;

/// Parse a launch date into an [`Epoch`] in the UTC time scale.
///
/// Accepted inputs are a bare calendar date (`YYYY-MM-DD`), a local datetime without
/// seconds (`YYYY-MM-DDTHH:MM`, as produced by date pickers) and any ISO-8601 form
/// understood by hifitime. The clock may end with `Z` or a `±hh[:mm]` UTC offset.
///
/// Argument
/// --------
/// * `launch_date`: the launch date as typed by the user
///
/// Return
/// ------
/// * the launch epoch, or [`InterceptError::InvalidLaunchEpoch`] if the string cannot be parsed
pub fn parse_launch_epoch(launch_date: &str) -> Result<Epoch, InterceptError> {
    let invalid = |reason: String| {
        InterceptError::InvalidLaunchEpoch(format!("{launch_date} ({reason})"))
    };

    let trimmed = launch_date.trim();
    let (normalized, offset) = match trimmed.split_once('T') {
        None if trimmed.len() == 10 => (format!("{trimmed}T00:00:00"), Duration::ZERO),
        None => (trimmed.to_string(), Duration::ZERO),
        Some((date, clock)) => {
            let zone_start = clock.find(['Z', 'z', '+', '-']).unwrap_or(clock.len());
            let (clock, zone) = clock.split_at(zone_start);
            let offset = utc_offset(zone)
                .ok_or_else(|| invalid(format!("unsupported zone suffix {zone:?}")))?;
            if clock.matches(':').count() == 1 {
                (format!("{date}T{clock}:00"), offset)
            } else {
                (format!("{date}T{clock}"), offset)
            }
        }
    };

    let local = Epoch::from_str(&normalized).map_err(|err| invalid(err.to_string()))?;
    Ok(local - offset)
}

/// Offset of a `Z`, `±hh`, `±hhmm` or `±hh:mm` suffix from UTC, `None` if malformed.
fn utc_offset(zone: &str) -> Option<Duration> {
    if zone.is_empty() || zone.eq_ignore_ascii_case("z") {
        return Some(Duration::ZERO);
    }
    let sign: i64 = match zone.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let digits: String = zone[1..].chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = digits[..2].parse().ok()?;
    let minutes: i64 = if digits.len() == 4 { digits[2..].parse().ok()? } else { 0 };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((sign * (hours * 60 + minutes)) * Unit::Minute)
}

/// Closest approach of the interstellar object, midnight UTC.
pub fn reference_epoch() -> Epoch {
    let (year, month, day) = REFERENCE_EPOCH_YMD;
    Epoch::from_gregorian_utc_at_midnight(year, month, day)
}

/// Signed number of days between `epoch` and the reference epoch.
///
/// Negative before closest approach, positive after.
pub fn day_offset(epoch: &Epoch) -> f64 {
    (*epoch - reference_epoch()).to_seconds() / SECONDS_PER_DAY
}

/// Signed number of Julian years between `epoch` and the reference epoch.
pub fn year_offset(epoch: &Epoch) -> Years {
    day_offset(epoch) / JULIAN_YEAR_DAYS
}

/// Format an epoch as a local datetime string (`YYYY-MM-DDTHH:MM`), the form expected
/// by the remote estimation service.
pub fn to_local_datetime(epoch: &Epoch) -> String {
    let (year, month, day, hour, minute, _, _) = epoch.to_gregorian_utc();
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}")
}
