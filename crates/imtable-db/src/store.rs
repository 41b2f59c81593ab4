use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use imtable_types::{Record, RecordKey, Weight};

/// Keyed rows of a table, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: IndexMap<RecordKey, Record>,
    duplicates: usize,
}

/// Outcome of [`RecordStore::upsert`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Upsert {
    Inserted,
    Merged {
        first: Weight,
        second: Weight,
        stored: Weight,
    },
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, or merge it into an existing row with the same key.
    ///
    /// On a merge the stored weight becomes the larger of the two and the
    /// existing comment is kept.
    pub fn upsert(&mut self, key: RecordKey, record: Record) -> Upsert {
        match self.records.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Upsert::Inserted
            }
            Entry::Occupied(mut slot) => {
                let first = slot.get().weight;
                let second = record.weight;
                warn!(
                    "duplicate {} {} first weight={} second weight={}",
                    slot.key().input,
                    slot.key().character,
                    first,
                    second
                );
                let stored = first.max(second);
                slot.get_mut().weight = stored;
                self.duplicates += 1;
                Upsert::Merged {
                    first,
                    second,
                    stored,
                }
            }
        }
    }

    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.records.get(key)
    }

    /// Weight of `(input, character)` if the row exists.
    pub fn weight(&self, input: &str, character: char) -> Option<Weight> {
        self.get(&RecordKey::new(input, character))
            .map(|record| record.weight)
    }

    /// Overwrite the weight of an existing row. Returns `false` when the row
    /// does not exist; rows are never created here.
    pub fn set_weight(&mut self, key: &RecordKey, weight: Weight) -> bool {
        match self.records.get_mut(key) {
            Some(record) => {
                record.weight = weight;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &Record)> + '_ {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&RecordKey, &mut Record)> + '_ {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of duplicate rows merged so far.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}
