//! # Flag Storage
//!
//! The only state quietfeed persists is one boolean under the key `enabled`.
//! It is shared between surfaces: the filter reads it once at startup and
//! then follows change notifications, while the toggle writes it.
//!
//! ## Notifications
//!
//! [`FlagStore::subscribe`] hands out a channel receiver. Every write that
//! changes the value sends a [`FlagChange`] to all live subscribers; writes
//! that leave the value unchanged stay silent. Receivers are drained by the
//! runtime loop, never blocked on.
//!
//! Writes made by another process are only seen after [`FlagStore::refresh`]
//! re-reads the backing medium.
//!
//! ## Implementations
//!
//! - [`memory::MemFlagStore`]: shared in-process store for tests and embedding.
//! - [`fs::FsFlagStore`]: JSON file in the data directory.

pub mod fs;
pub mod memory;

use crate::error::Result;
use crate::model::FlagChange;
use std::sync::mpsc::{Receiver, Sender};

pub const ENABLED_KEY: &str = "enabled";

pub trait FlagStore {
    /// The stored value, `None` when the key was never written.
    fn load_enabled(&self) -> Result<Option<bool>>;

    fn store_enabled(&self, enabled: bool) -> Result<()>;

    fn subscribe(&self) -> Receiver<FlagChange>;

    /// Pick up writes made elsewhere, notifying subscribers of a change.
    fn refresh(&self) -> Result<()> {
        Ok(())
    }
}

/// Send `change` to every subscriber, forgetting those that hung up.
pub(crate) fn broadcast(subscribers: &mut Vec<Sender<FlagChange>>, change: FlagChange) {
    subscribers.retain(|tx| tx.send(change).is_ok());
}
