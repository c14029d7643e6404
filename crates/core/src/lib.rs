//! Core library for toolhub
//!
//! This crate implements the **Functional Core** of the toolhub data layer,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The toolhub project uses a two-crate architecture:
//!
//! - **`toolhub_core`** (this crate): entity models, seed data and pure collection logic
//! - **`toolhub`**: persistence slots, async services with simulated latency, and the CLI
//!
//! Nothing in this crate touches the filesystem, the clock of a runtime, or a
//! global. Stores are plain values that the shell owns and passes around, so
//! every test can build its own isolated instance from fixture data.
//!
//! # Module Organization
//!
//! - [`store`]: the generic ordered [`store::EntityStore`] and the [`store::Lookup`] result
//! - [`snapshot`]: encoding and decoding of whole-collection JSON snapshots
//! - [`ids`]: monotonic, time-derived identifier sequencing
//! - [`blog`]: blog posts, categories, patches and the seed collection
//! - [`users`]: users, patches and the seed collection
//! - [`seo`]: the read-only metrics fixture and recommendation rules
//!
//! # Example Usage
//!
//! ```rust
//! use toolhub_core::blog::seed_posts;
//! use toolhub_core::store::EntityStore;
//!
//! let store = EntityStore::new(seed_posts());
//! let recent: Vec<String> = store.recent(2).into_iter().map(|p| p.id).collect();
//!
//! assert_eq!(recent, vec!["1", "2"]);
//! ```

pub mod blog;
pub mod ids;
pub mod seo;
pub mod snapshot;
pub mod store;
pub mod users;
