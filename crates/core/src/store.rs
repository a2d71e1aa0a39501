//! In-memory ordered record store backing one view.

use chrono::Utc;

use crate::entity::Entity;
use crate::types::RecordId;

/// Issues time-derived record identifiers.
///
/// An id is the current time in milliseconds since the Unix epoch, bumped past
/// the last issued id when the clock has not moved on. Ids from one generator
/// are strictly increasing.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: RecordId,
}

impl IdGenerator {
    /// A generator whose first id is greater than `last`.
    pub fn starting_after(last: RecordId) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> RecordId {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last { now } else { self.last + 1 };
        self.last = id;
        id
    }
}

/// Ordered sequence of records, in insertion order.
#[derive(Debug, Clone)]
pub struct EntityStore<E> {
    records: Vec<E>,
    ids: IdGenerator,
}

impl<E: Entity> EntityStore<E> {
    /// A store holding the entity's seed rows.
    pub fn seeded() -> Self {
        Self::from_records(E::seed())
    }

    pub fn from_records(records: Vec<E>) -> Self {
        let last = records.iter().filter_map(|r| r.id()).max().unwrap_or(0);
        Self {
            records,
            ids: IdGenerator::starting_after(last),
        }
    }

    pub fn list(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record` under a fresh identifier and return that identifier.
    ///
    /// Any identifier already on `record` is overwritten. No field is checked
    /// for uniqueness.
    pub fn add(&mut self, record: E) -> RecordId {
        let id = self.ids.next_id();
        self.records.push(record.with_id(id));
        id
    }

    /// Replace every record whose identifier is `id` with `record`.
    ///
    /// The stored identifier stays `id`. Returns how many records were
    /// replaced; zero when `id` is absent.
    pub fn replace(&mut self, id: RecordId, record: E) -> usize {
        let mut replaced = 0;
        for slot in self.records.iter_mut().filter(|r| r.id() == Some(id)) {
            *slot = record.clone().with_id(id);
            replaced += 1;
        }
        replaced
    }

    /// Remove every record matching `predicate`. Returns how many were removed.
    pub fn remove<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&E) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|record| !predicate(record));
        before - self.records.len()
    }

    /// First record whose secondary key equals `key` exactly.
    pub fn find_by_key(&self, key: &str) -> Option<&E> {
        self.records.iter().find(|r| r.secondary_key() == key)
    }
}
