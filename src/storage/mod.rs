//! Per-user state persistence.
//!
//! All durable state lives as small JSON files under the data directory,
//! one namespace per username. The store assumes a single active process
//! per data directory; two concurrent writers are last-write-wins. That
//! limitation is accepted, not worked around.

mod store;

pub use store::{StateStore, StorageError};
