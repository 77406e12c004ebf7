//! Enablement state machine.
//!
//! ```text
//!            flag → false: reveal_all
//!   Enabled ─────────────────────────▶ Disabled
//!      ▲                                  │
//!      └──────────────────────────────────┘
//!            flag → true: full scan
//! ```
//!
//! Disabling never unregisters watchers or stops the rescan timer. Hide
//! actions read the flag themselves, so while disabled every trigger still
//! fires and simply does nothing.

use crate::actions::reveal_all;
use crate::dom::HostDom;
use crate::model::{Enablement, FlagChange};
use crate::scanner::Scanner;
use crate::state::FilterState;
use crate::store::FlagStore;
use log::{info, warn};
use std::sync::mpsc::Receiver;

/// Outcome of applying a target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Enabled { hidden: usize },
    Disabled { revealed: usize },
}

/// Follows the persisted flag and drives transitions.
pub struct EnablementController {
    changes: Receiver<FlagChange>,
}

impl EnablementController {
    pub fn subscribe<S: FlagStore>(store: &S) -> Self {
        Self {
            changes: store.subscribe(),
        }
    }

    /// Startup state: the stored flag, Enabled when absent or unreadable.
    pub fn initial<S: FlagStore>(store: &S) -> Enablement {
        match store.load_enabled() {
            Ok(value) => Enablement::from_stored(value),
            Err(e) => {
                warn!("could not read enabled flag, assuming enabled: {}", e);
                Enablement::Enabled
            }
        }
    }

    /// Move to `target`, running the scan or reveal the transition implies.
    pub fn apply<D: HostDom>(
        scanner: &Scanner,
        dom: &mut D,
        state: &mut FilterState<D::Node>,
        target: Enablement,
    ) -> Transition {
        if state.enablement() == target {
            return Transition::Unchanged;
        }
        state.set_enablement(target);
        match target {
            Enablement::Enabled => {
                let body = dom.body();
                let hidden = scanner.scan(dom, state, body);
                info!("filter enabled, {} posts hidden", hidden);
                Transition::Enabled { hidden }
            }
            Enablement::Disabled => {
                let revealed = reveal_all(dom, state);
                info!("filter disabled, {} posts revealed", revealed);
                Transition::Disabled { revealed }
            }
        }
    }

    /// Apply every queued flag change, in arrival order.
    pub fn drain<D: HostDom>(
        &self,
        scanner: &Scanner,
        dom: &mut D,
        state: &mut FilterState<D::Node>,
    ) -> Vec<Transition> {
        self.changes
            .try_iter()
            .map(|change| {
                Self::apply(scanner, dom, state, Enablement::from_stored(change.new_value))
            })
            .filter(|t| *t != Transition::Unchanged)
            .collect()
    }
}
