use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    sync::OnceLock,
};
use time::{Time, format_description::FormatItem};

static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();

///
/// SlotTime
///
/// Wall-clock start time of an interview slot, minute precision,
/// rendered as `HH:MM`. Conflict checks compare at this precision.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct SlotTime(Time);

impl SlotTime {
    pub const MIDNIGHT: Self = Self(Time::MIDNIGHT);

    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        Time::from_hms(hour, minute, 0).ok().map(Self)
    }

    /// Whole-hour slot, as allocated by the scheduling window.
    #[must_use]
    pub fn on_the_hour(hour: u8) -> Option<Self> {
        Self::new(hour, 0)
    }

    /// Parse an `HH:MM` string.
    pub fn parse(s: &str) -> Option<Self> {
        let format =
            FORMAT.get_or_init(|| time::format_description::parse("[hour]:[minute]").unwrap());

        Time::parse(s, format).ok().map(Self::truncate)
    }

    /// Drop seconds and sub-second precision from a wall-clock time.
    #[must_use]
    pub(crate) fn truncate(time: Time) -> Self {
        Self::new(time.hour(), time.minute()).unwrap_or(Self::MIDNIGHT)
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.0.hour()
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.0.minute()
    }

    #[must_use]
    pub(crate) const fn time(self) -> Time {
        self.0
    }
}

impl Debug for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotTime({self})")
    }
}

impl Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for SlotTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid slot time: {s}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_zero_padded() {
        let slot = SlotTime::new(9, 5).unwrap();
        assert_eq!(slot.to_string(), "09:05");
    }

    #[test]
    fn parse_round_trips() {
        let slot = SlotTime::parse("14:30").unwrap();
        assert_eq!(slot.hour(), 14);
        assert_eq!(slot.minute(), 30);
        assert_eq!(slot.to_string(), "14:30");
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(SlotTime::parse("25:00").is_none());
        assert!(SlotTime::parse("10:61").is_none());
        assert!(SlotTime::parse("ten").is_none());
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(SlotTime::new(24, 0).is_none());
        assert!(SlotTime::new(10, 60).is_none());
    }

    #[test]
    fn ordering_follows_wall_clock() {
        let nine = SlotTime::on_the_hour(9).unwrap();
        let ten = SlotTime::on_the_hour(10).unwrap();
        assert!(nine < ten);
    }
}
