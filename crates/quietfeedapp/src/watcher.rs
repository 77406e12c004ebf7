//! Insertion watching and the periodic rescan backstop.
//!
//! Two independent triggers feed the same scanner:
//!
//! - [`MutationWatcher`] reacts to insertion records anywhere under the
//!   observed root, scanning each inserted element's subtree and checking the
//!   element itself.
//! - [`RescanTimer`] fires a full rescan at a fixed period, catching posts
//!   whose insertion was missed or batched away.
//!
//! They are not coordinated; the registry makes overlap harmless.

use crate::dom::HostDom;
use crate::model::MutationRecord;
use crate::scanner::Scanner;
use crate::state::FilterState;
use log::trace;
use std::time::{Duration, Instant};

pub const DEFAULT_RESCAN_INTERVAL: Duration = Duration::from_millis(2000);

pub struct MutationWatcher<N> {
    root: Option<N>,
}

impl<N> Default for MutationWatcher<N> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<N: Copy + Eq> MutationWatcher<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch insertions anywhere below `root`, at any depth.
    pub fn observe(&mut self, root: N) {
        self.root = Some(root);
    }

    pub fn is_observing(&self) -> bool {
        self.root.is_some()
    }

    /// Process a batch of records. Returns the number of posts hidden.
    pub fn handle<D>(
        &self,
        scanner: &Scanner,
        dom: &mut D,
        state: &mut FilterState<N>,
        records: Vec<MutationRecord<N>>,
    ) -> usize
    where
        D: HostDom<Node = N>,
        N: std::hash::Hash + std::fmt::Debug,
    {
        let Some(root) = self.root else {
            return 0;
        };

        let mut hidden = 0;
        for node in records.into_iter().flat_map(|r| r.added_nodes) {
            if !dom.is_element(node) || !is_within(&*dom, root, node) {
                continue;
            }
            trace!("inserted {:?}", node);
            hidden += scanner.scan(dom, state, node);
            if scanner.check_and_hide(dom, state, node) {
                hidden += 1;
            }
        }
        hidden
    }
}

fn is_within<D: HostDom>(dom: &D, root: D::Node, node: D::Node) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n == root {
            return true;
        }
        current = dom.parent(n);
    }
    false
}

/// Fixed-period trigger, polled by the runtime loop.
#[derive(Debug, Clone)]
pub struct RescanTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for RescanTimer {
    fn default() -> Self {
        Self::new(DEFAULT_RESCAN_INTERVAL)
    }
}

impl RescanTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// True once per elapsed period. Missed periods collapse into one firing
    /// and the timer re-arms from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}
