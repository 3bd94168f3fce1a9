use chrono::{DateTime, Days, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Largest offset in use anywhere (UTC+14 / UTC-12, rounded to 14h both ways)
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// The fixed UTC offset that defines where one day ends and the next begins.
///
/// Every date key in the system is derived through one of these, so client
/// and server can never disagree about which day an instant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTimezone {
    offset: FixedOffset,
}

impl ReferenceTimezone {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Offset expressed in minutes east of UTC (UTC+01:00 is `60`).
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, DomainError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(DomainError::Validation(format!(
                "UTC offset must be within ±{} minutes, got {}",
                MAX_OFFSET_MINUTES, minutes
            )));
        }

        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            DomainError::Validation(format!("Invalid UTC offset: {} minutes", minutes))
        })?;

        Ok(Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for ReferenceTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

/// A calendar day in the reference timezone, formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "Invalid calendar date {:04}-{:02}-{:02}",
                    year, month, day
                ))
            })
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        // chrono tolerates signs and padding; keys must be exactly YYYY-MM-DD
        if !is_canonical_shape(value) {
            return Err(DomainError::InvalidInput(format!(
                "Invalid date key '{}', expected YYYY-MM-DD",
                value
            )));
        }

        NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|e| {
                DomainError::InvalidInput(format!(
                    "Invalid date key '{}', expected YYYY-MM-DD ({})",
                    value, e
                ))
            })
    }

    /// Calendar day the instant falls on in the reference timezone.
    pub fn from_instant(instant: DateTime<Utc>, tz: &ReferenceTimezone) -> Self {
        Self(instant.with_timezone(&tz.offset()).date_naive())
    }

    pub fn today(tz: &ReferenceTimezone) -> Self {
        Self::from_instant(Utc::now(), tz)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn checked_sub_days(&self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }

    /// Signed number of days from `self` to `later`.
    pub fn days_until(&self, later: &DateKey) -> i64 {
        (later.0 - self.0).num_days()
    }
}

fn is_canonical_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_and_format() {
        let key = DateKey::parse("2024-05-04").unwrap();
        assert_eq!(key.to_string(), "2024-05-04");
        assert_eq!(key, DateKey::from_ymd(2024, 5, 4).unwrap());
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!(DateKey::parse("2024-5-4").is_err());
        assert!(DateKey::parse("04/05/2024").is_err());
        assert!(DateKey::parse("2024-02-30").is_err());
        assert!(DateKey::parse("").is_err());

        // Same length as a canonical key, but signed or space-padded
        for value in ["+2024-5-04", " 2024-5-04", "+2024-05-4", "2024- 5- 4", "2024-05-0 "] {
            assert!(DateKey::parse(value).is_err(), "accepted {:?}", value);
        }
    }

    #[test]
    fn test_from_instant_respects_reference_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 4, 23, 30, 0).unwrap();

        let utc_key = DateKey::from_instant(instant, &ReferenceTimezone::utc());
        assert_eq!(utc_key.to_string(), "2024-05-04");

        let plus_one = ReferenceTimezone::from_offset_minutes(60).unwrap();
        assert_eq!(
            DateKey::from_instant(instant, &plus_one).to_string(),
            "2024-05-05"
        );

        let early = Utc.with_ymd_and_hms(2024, 5, 4, 2, 0, 0).unwrap();
        let minus_five = ReferenceTimezone::from_offset_minutes(-300).unwrap();
        assert_eq!(
            DateKey::from_instant(early, &minus_five).to_string(),
            "2024-05-03"
        );
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(ReferenceTimezone::from_offset_minutes(14 * 60).is_ok());
        assert!(ReferenceTimezone::from_offset_minutes(14 * 60 + 1).is_err());
        assert!(ReferenceTimezone::from_offset_minutes(-(14 * 60 + 1)).is_err());
        assert_eq!(
            ReferenceTimezone::from_offset_minutes(-330)
                .unwrap()
                .offset_minutes(),
            -330
        );
    }

    #[test]
    fn test_calendar_arithmetic_crosses_month_boundary() {
        let key = DateKey::parse("2024-03-01").unwrap();
        assert_eq!(key.pred().unwrap().to_string(), "2024-02-29");
        assert_eq!(key.checked_sub_days(7).unwrap().to_string(), "2024-02-23");
        assert_eq!(
            DateKey::parse("2024-02-28").unwrap().days_until(&key),
            2
        );
    }

    #[test]
    fn test_serde_uses_string_form() {
        let key = DateKey::parse("2024-05-01").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-05-01\"");

        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"2024-13-01\"").is_err());
    }
}
