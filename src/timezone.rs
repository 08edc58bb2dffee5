//! Local calendar-date capture for the once-per-pass "today" snapshot.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The current UTC offset of a canonical timezone such as `Asia/Kolkata`.
pub fn local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

/// Today's calendar date in a canonical timezone.
///
/// Capture this once per recomputation pass and thread it through the
/// engine; re-sampling per predicate would skew results across a midnight
/// boundary.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = local_offset(canonical_timezone)?;
    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{local_offset, local_today};

    #[test]
    fn resolves_a_canonical_timezone() {
        assert!(local_offset("Asia/Kolkata").is_ok());
        assert!(local_today("Pacific/Auckland").is_ok());
    }

    #[test]
    fn rejects_an_unknown_timezone() {
        assert_eq!(
            local_today("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezone("Mars/Olympus_Mons".to_owned()))
        );
    }
}
