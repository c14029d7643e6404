//! Asynchronous query and mutation services
//!
//! Each entity service is a thin typed facade over a [`Repository`], which
//! owns the lazily loaded [`EntityStore`] and mirrors it to a storage slot
//! after every effective mutation.

mod blog;
mod seo;
mod users;

pub use blog::{BlogService, DEFAULT_RECENT_LIMIT};
pub use seo::SeoService;
pub use users::UserService;

use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use toolhub_core::ids::IdSequence;
use toolhub_core::snapshot::{self, LoadOrigin};
use toolhub_core::store::{Entity, EntityStore};

use crate::error::Result;
use crate::storage::Slots;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Settings shared by every service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Artificial delay applied before every call
    pub latency: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }
}

impl ServiceConfig {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// No artificial delay, for tests and scripting
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub(crate) async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Everything a repository knows once its slot has been read
#[derive(Debug)]
struct Loaded<T> {
    store: EntityStore<T>,
    ids: IdSequence,
    origin: LoadOrigin,
}

/// One entity collection backed by one storage slot
#[derive(Debug)]
pub(crate) struct Repository<T, S> {
    slot: &'static str,
    slots: S,
    seed: fn() -> Vec<T>,
    config: ServiceConfig,
    state: Mutex<Option<Loaded<T>>>,
}

/// Generator handed to mutations that create records
pub(crate) struct NewId<'a> {
    ids: &'a mut IdSequence,
}

impl NewId<'_> {
    pub(crate) fn next(&mut self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.ids.next(now)
    }
}

impl<T, S> Repository<T, S>
where
    T: Entity + Serialize + DeserializeOwned + Send,
    S: Slots,
{
    pub(crate) fn new(
        slot: &'static str,
        slots: S,
        seed: fn() -> Vec<T>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            slot,
            slots,
            seed,
            config,
            state: Mutex::new(None),
        }
    }

    pub(crate) fn slots(&self) -> &S {
        &self.slots
    }

    /// Origin of the collection, `None` until the first call loads it
    pub(crate) async fn load_origin(&self) -> Option<LoadOrigin> {
        self.state.lock().await.as_ref().map(|l| l.origin.clone())
    }

    fn load(&self) -> Loaded<T> {
        let raw = match self.slots.read(self.slot) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("could not read slot {}: {}", self.slot, e);
                return self.recovered(e.to_string());
            }
        };

        let (records, origin) = snapshot::resolve(raw.as_deref(), self.seed);
        match &origin {
            LoadOrigin::Snapshot => {
                log::debug!("loaded {} records from slot {}", records.len(), self.slot)
            }
            LoadOrigin::Seed => log::debug!("slot {} is empty, using seed data", self.slot),
            LoadOrigin::Recovered(reason) => log::warn!(
                "slot {} holds an unreadable snapshot, using seed data: {}",
                self.slot,
                reason
            ),
        }

        Self::loaded(records, origin)
    }

    fn recovered(&self, reason: String) -> Loaded<T> {
        Self::loaded((self.seed)(), LoadOrigin::Recovered(reason))
    }

    fn loaded(records: Vec<T>, origin: LoadOrigin) -> Loaded<T> {
        let ids = IdSequence::primed(records.iter().map(|r| r.id()));
        Loaded {
            store: EntityStore::new(records),
            ids,
            origin,
        }
    }

    /// Run a read-only query after the artificial delay
    pub(crate) async fn read<R, F>(&self, query: F) -> R
    where
        F: FnOnce(&EntityStore<T>) -> R,
    {
        self.config.simulate_latency().await;

        let mut state = self.state.lock().await;
        let loaded = state.get_or_insert_with(|| self.load());
        query(&loaded.store)
    }

    /// Run a mutation after the artificial delay
    ///
    /// The mutation works on a copy of the collection and reports whether it
    /// changed anything. A changed copy is written to the slot and only then
    /// becomes the live collection, so a failed write leaves the store as it was.
    pub(crate) async fn mutate<R, F>(&self, mutation: F) -> Result<R>
    where
        F: FnOnce(&mut EntityStore<T>, &mut NewId<'_>) -> (R, bool),
    {
        self.config.simulate_latency().await;

        let mut state = self.state.lock().await;
        let loaded = state.get_or_insert_with(|| self.load());

        let mut working = loaded.store.clone();
        let mut ids = loaded.ids.clone();
        let (result, changed) = mutation(&mut working, &mut NewId { ids: &mut ids });

        if changed {
            let raw = snapshot::encode(working.records())?;
            self.slots.write(self.slot, &raw)?;
            log::debug!("saved {} records to slot {}", working.len(), self.slot);
            loaded.store = working;
        }
        // Issued ids are never reused, even if the write failed
        loaded.ids = ids;

        Ok(result)
    }
}
