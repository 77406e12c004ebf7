use super::{broadcast, FlagStore};
use crate::error::{QuietfeedError, Result};
use crate::model::FlagChange;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Default)]
struct Inner {
    value: Option<bool>,
    subscribers: Vec<Sender<FlagChange>>,
    simulate_read_error: bool,
}

/// In-memory flag store.
///
/// Clones share the same value and subscribers, standing in for the
/// cross-surface store: hand one clone to the filter and another to the
/// toggle. Single-threaded, hence `Rc<RefCell<_>>`.
#[derive(Clone, Default)]
pub struct MemFlagStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(enabled: bool) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().value = Some(enabled);
        store
    }

    /// Remove the key, notifying subscribers if it was set.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        let old_value = inner.value.take();
        if old_value.is_some() {
            broadcast(
                &mut inner.subscribers,
                FlagChange {
                    old_value,
                    new_value: None,
                },
            );
        }
    }

    /// Make reads fail, for exercising startup fallbacks.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.inner.borrow_mut().simulate_read_error = simulate;
    }
}

impl FlagStore for MemFlagStore {
    fn load_enabled(&self) -> Result<Option<bool>> {
        let inner = self.inner.borrow();
        if inner.simulate_read_error {
            return Err(QuietfeedError::Store("Simulated read error".to_string()));
        }
        Ok(inner.value)
    }

    fn store_enabled(&self, enabled: bool) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let old_value = inner.value.replace(enabled);
        if old_value != Some(enabled) {
            broadcast(
                &mut inner.subscribers,
                FlagChange {
                    old_value,
                    new_value: Some(enabled),
                },
            );
        }
        Ok(())
    }

    fn subscribe(&self) -> Receiver<FlagChange> {
        let (tx, rx) = mpsc::channel();
        self.inner.borrow_mut().subscribers.push(tx);
        rx
    }
}
