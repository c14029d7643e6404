//! Mock data services for the toolhub utility directory and blog admin panel
//!
//! This crate is the **Imperative Shell** around [`toolhub_core`]: it owns the
//! durable key-value [`storage::Slots`] and the asynchronous services the UI
//! layer calls. Every service call waits for a fixed artificial latency before
//! it runs, so loading states behave the way they would against a network
//! backend.
//!
//! ```rust,no_run
//! use toolhub::service::{BlogService, ServiceConfig};
//! use toolhub::storage::MemorySlots;
//!
//! # async fn demo() -> toolhub::error::Result<()> {
//! let blog = BlogService::new(MemorySlots::new(), ServiceConfig::default());
//! let recent = blog.get_recent(Some(2)).await;
//! assert_eq!(recent.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;
pub mod storage;

pub use toolhub_core::store::Lookup;
