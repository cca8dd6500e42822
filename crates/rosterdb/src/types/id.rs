use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
    sync::{LazyLock, Mutex},
};
use ulid::Ulid;

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state so that ids created within the same millisecond
/// stay in creation order
///

static GENERATOR: LazyLock<Mutex<ulid::Generator>> =
    LazyLock::new(|| Mutex::new(ulid::Generator::new()));

///
/// RecordId
///
/// Opaque unique key assigned to every stored record. ULID-backed so ids
/// sort by creation time.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct RecordId(Ulid);

impl RecordId {
    /// Generate the next id from the global monotonic generator.
    ///
    /// Overflowing the random component within one millisecond is not
    /// reachable in practice; if it ever happens we take a fresh random id
    /// and give up strict ordering for that single id.
    #[must_use]
    pub fn generate() -> Self {
        let mut generator = GENERATOR.lock().expect("id generator mutex poisoned");

        Self(generator.generate().unwrap_or_else(|_| Ulid::new()))
    }

    /// Parse a canonical 26-character ULID string.
    pub fn parse(s: &str) -> Option<Self> {
        Ulid::from_string(s).ok().map(Self)
    }

    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(Ulid(n))
    }

    /// Millisecond timestamp component of the id.
    #[must_use]
    pub const fn timestamp_ms(self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid record id: {s}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_monotonic() {
        let a = RecordId::generate();
        let b = RecordId::generate();

        assert!(a < b);
    }

    #[test]
    fn parse_round_trips_display() {
        let id = RecordId::generate();
        let parsed = RecordId::parse(&id.to_string()).unwrap();

        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(RecordId::parse("not-a-ulid").is_none());
        assert!(RecordId::parse("").is_none());
    }

    #[test]
    fn serde_uses_canonical_string() {
        let id = RecordId::from_u128(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: RecordId = serde_json::from_str(&json).unwrap();

        assert!(json.starts_with('"'));
        assert_eq!(id, back);
    }
}
