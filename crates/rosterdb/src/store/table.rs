use crate::{error::Error, types::RecordId};
use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
};

///
/// Record
///
/// A row the store can hold: an arena id plus a natural key used for
/// duplicate detection. For events the natural key is the id itself.
///

pub(crate) trait Record: Clone {
    const ENTITY: &'static str;

    type Key: Clone + Debug + Display + Ord;

    fn id(&self) -> RecordId;
    fn key(&self) -> Self::Key;
}

///
/// Table
///
/// In-memory table: arena of records keyed by id with a unique secondary
/// index on the natural key. Every mutation funnels through these methods,
/// which check first and write second, so a failed write leaves both maps
/// untouched and no half-applied row is ever observable.
///

#[derive(Clone, Debug)]
pub(crate) struct Table<R: Record> {
    rows: BTreeMap<RecordId, R>,
    by_key: BTreeMap<R::Key, RecordId>,
}

impl<R: Record> Table<R> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            by_key: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &R::Key) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn contains_id(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn get(&self, key: &R::Key) -> Option<&R> {
        let id = self.by_key.get(key)?;
        self.rows.get(id)
    }

    /// Insert a new row; rejects natural-key and id collisions.
    pub fn insert(&mut self, row: R) -> Result<(), Error> {
        let key = row.key();
        if self.by_key.contains_key(&key) {
            return Err(Error::duplicate_key(R::ENTITY, key.to_string()));
        }
        if self.rows.contains_key(&row.id()) {
            return Err(Error::duplicate_key(R::ENTITY, row.id().to_string()));
        }

        self.by_key.insert(key, row.id());
        self.rows.insert(row.id(), row);

        Ok(())
    }

    /// Replace an existing row in place. The natural key must not change.
    pub fn modify(&mut self, key: &R::Key, f: impl FnOnce(&mut R)) -> Option<R> {
        let id = *self.by_key.get(key)?;
        let row = self.rows.get_mut(&id)?;

        f(row);
        debug_assert!(
            row.key() == *key && row.id() == id,
            "table keys are immutable under modify"
        );

        Some(row.clone())
    }

    pub fn remove(&mut self, key: &R::Key) -> Option<R> {
        let id = self.by_key.remove(key)?;
        let row = self.rows.remove(&id);
        debug_assert!(row.is_some(), "index pointed at a missing row");

        row
    }

    /// Remove and return every row matching the predicate (cascade path).
    pub fn drain_matching(&mut self, pred: impl Fn(&R) -> bool) -> Vec<R> {
        let keys: Vec<R::Key> = self
            .rows
            .values()
            .filter(|row| pred(row))
            .map(Record::key)
            .collect();

        keys.iter().filter_map(|key| self.remove(key)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.by_key.clear();
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: RecordId,
        email: String,
        hits: u32,
    }

    impl Row {
        fn new(email: &str) -> Self {
            Self {
                id: RecordId::generate(),
                email: email.to_string(),
                hits: 0,
            }
        }
    }

    impl Record for Row {
        const ENTITY: &'static str = "row";

        type Key = String;

        fn id(&self) -> RecordId {
            self.id
        }

        fn key(&self) -> String {
            self.email.clone()
        }
    }

    #[test]
    fn insert_rejects_duplicate_natural_key() {
        let mut table = Table::new();
        table.insert(Row::new("a@co.com")).unwrap();

        let err = table.insert(Row::new("a@co.com")).unwrap_err();
        assert!(err.is_duplicate_key());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn failed_insert_leaves_both_maps_untouched() {
        let mut table = Table::new();
        let first = Row::new("a@co.com");
        let first_id = first.id;
        table.insert(first).unwrap();
        table.insert(Row::new("a@co.com")).unwrap_err();

        assert_eq!(table.get(&"a@co.com".to_string()).unwrap().id, first_id);
        assert!(table.contains_id(first_id));
    }

    #[test]
    fn modify_returns_updated_row() {
        let mut table = Table::new();
        table.insert(Row::new("a@co.com")).unwrap();

        let updated = table
            .modify(&"a@co.com".to_string(), |row| row.hits += 1)
            .unwrap();
        assert_eq!(updated.hits, 1);
        assert_eq!(table.get(&"a@co.com".to_string()).unwrap().hits, 1);
    }

    #[test]
    fn remove_clears_the_index_too() {
        let mut table = Table::new();
        table.insert(Row::new("a@co.com")).unwrap();
        let removed = table.remove(&"a@co.com".to_string()).unwrap();

        assert!(table.is_empty());
        assert!(!table.contains(&"a@co.com".to_string()));
        assert!(!table.contains_id(removed.id));
    }

    #[test]
    fn drain_matching_removes_only_matches() {
        let mut table = Table::new();
        table.insert(Row::new("a@co.com")).unwrap();
        table.insert(Row::new("b@co.com")).unwrap();
        table.insert(Row::new("c@other.io")).unwrap();

        let drained = table.drain_matching(|row| row.email.ends_with("co.com"));
        assert_eq!(drained.len(), 2);
        assert_eq!(table.len(), 1);
        assert!(table.contains(&"c@other.io".to_string()));
    }
}
