use crate::types::SlotTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use time::{
    Date, Duration, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
};

///
/// Timestamp
///
/// Point in time carried by every record, serialized as an RFC 3339 /
/// ISO-8601 string. Calendar-day partitioning and slot extraction use the
/// timestamp's own recorded offset.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    #[must_use]
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parse an RFC 3339 string, e.g. `2026-03-02T10:00:00Z`.
    pub fn parse(s: &str) -> Option<Self> {
        OffsetDateTime::parse(s, &Rfc3339).ok().map(Self)
    }

    /// Midnight-anchored timestamp for a calendar date at a given slot time.
    #[must_use]
    pub fn from_date_slot(date: Date, slot: SlotTime) -> Self {
        Self(PrimitiveDateTime::new(date, slot.time()).assume_utc())
    }

    /// Calendar date this timestamp falls on, in its recorded offset.
    #[must_use]
    pub const fn date(self) -> Date {
        self.0.date()
    }

    /// Start time truncated to the minute.
    #[must_use]
    pub fn slot(self) -> SlotTime {
        SlotTime::truncate(self.0.time())
    }

    #[must_use]
    pub fn plus_minutes(self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    #[must_use]
    pub const fn unix_timestamp(self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)
            .and_then(|s| serializer.serialize_str(&s))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_round_trips_display() {
        let ts = Timestamp::parse("2026-03-02T10:00:00Z").unwrap();
        assert_eq!(ts.to_string(), "2026-03-02T10:00:00Z");
    }

    #[test]
    fn invalid_strings_are_rejected() {
        assert!(Timestamp::parse("2026-03-02").is_none());
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn date_and_slot_partition() {
        let ts = Timestamp::parse("2026-03-02T14:30:45Z").unwrap();
        assert_eq!(ts.date(), date!(2026 - 03 - 02));
        assert_eq!(ts.slot().to_string(), "14:30");
    }

    #[test]
    fn from_date_slot_builds_expected_instant() {
        let slot = SlotTime::on_the_hour(9).unwrap();
        let ts = Timestamp::from_date_slot(date!(2026 - 03 - 02), slot);
        assert_eq!(ts.to_string(), "2026-03-02T09:00:00Z");
    }

    #[test]
    fn plus_minutes_crosses_the_hour() {
        let ts = Timestamp::parse("2026-03-02T10:30:00Z").unwrap();
        assert_eq!(ts.plus_minutes(60).to_string(), "2026-03-02T11:30:00Z");
    }

    #[test]
    fn serde_round_trip() {
        let ts = Timestamp::parse("2026-03-02T10:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-03-02T10:00:00Z\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
