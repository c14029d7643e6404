//! Generic in-memory entity store
//!
//! An [`EntityStore`] owns the ordered collection for one entity type. All
//! reads hand back owned clones, so nothing outside the store can hold a
//! reference into it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record that can live in an [`EntityStore`]
pub trait Entity: Clone {
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Result of a lookup by identifier
///
/// "Not found" is an ordinary outcome, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "record", rename_all = "snake_case")]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(record) => Lookup::Found(f(record)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound,
        }
    }
}

/// Where a newly created record goes in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

/// Ordered collection of entities of one type
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<T> {
    records: Vec<T>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the collection for serialization
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn all(&self) -> Vec<T> {
        self.records.clone()
    }

    /// First record whose id equals `id`
    pub fn find(&self, id: &str) -> Lookup<T> {
        self.records.iter().find(|r| r.id() == id).cloned().into()
    }

    /// All records matching `predicate`, in collection order
    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Up to `limit` records, newest first
    ///
    /// Records with equal timestamps keep their collection order.
    pub fn recent(&self, limit: usize) -> Vec<T> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        sorted.truncate(limit);
        sorted
    }

    pub fn insert(&mut self, record: T, placement: Placement) {
        match placement {
            Placement::Front => self.records.insert(0, record),
            Placement::Back => self.records.push(record),
        }
    }

    /// Apply `apply` to the first record with the given id
    ///
    /// Returns the record as it is after the update.
    pub fn update<F>(&mut self, id: &str, apply: F) -> Lookup<T>
    where
        F: FnOnce(&mut T),
    {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                apply(record);
                Lookup::Found(record.clone())
            }
            None => Lookup::NotFound,
        }
    }

    /// Remove the first record with the given id
    ///
    /// Returns true when the collection shrank.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }
}
