use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

///
/// StoreMeta
/// Lifecycle marker for the whole store.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMeta {
    pub seed_state: SeedState,
    pub last_seeded_at: Option<Timestamp>,
    pub last_updated_at: Option<Timestamp>,
}

impl StoreMeta {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            seed_state: SeedState::Cleared,
            last_seeded_at: None,
            last_updated_at: None,
        }
    }

    /// Any successful organic write: `Cleared` becomes `Custom`,
    /// `Seeded` and `Custom` are sticky.
    pub(crate) fn note_write(&mut self) {
        if self.seed_state == SeedState::Cleared {
            self.seed_state = SeedState::Custom;
        }
        self.last_updated_at = Some(Timestamp::now());
    }

    pub(crate) fn note_clear(&mut self) {
        self.seed_state = SeedState::Cleared;
        self.last_updated_at = Some(Timestamp::now());
    }

    pub(crate) fn note_seed(&mut self) {
        let now = Timestamp::now();
        self.seed_state = SeedState::Seeded;
        self.last_seeded_at = Some(now);
        self.last_updated_at = Some(now);
    }
}

impl Default for StoreMeta {
    fn default() -> Self {
        Self::new()
    }
}

///
/// SeedState
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum SeedState {
    Cleared,
    Custom,
    Seeded,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let meta = StoreMeta::new();
        assert_eq!(meta.seed_state, SeedState::Cleared);
        assert!(meta.last_seeded_at.is_none());
    }

    #[test]
    fn first_write_flips_cleared_to_custom() {
        let mut meta = StoreMeta::new();
        meta.note_write();
        assert_eq!(meta.seed_state, SeedState::Custom);
        assert!(meta.last_updated_at.is_some());
    }

    #[test]
    fn seeded_is_sticky_across_writes() {
        let mut meta = StoreMeta::new();
        meta.note_seed();
        meta.note_write();
        assert_eq!(meta.seed_state, SeedState::Seeded);
    }

    #[test]
    fn clear_resets_seed_state() {
        let mut meta = StoreMeta::new();
        meta.note_seed();
        meta.note_clear();
        assert_eq!(meta.seed_state, SeedState::Cleared);
    }
}
