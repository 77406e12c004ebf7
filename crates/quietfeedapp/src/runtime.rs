//! # Runtime Loop
//!
//! [`FeedGuard`] wires the filter to its three trigger sources and is driven
//! cooperatively by the host's event loop:
//!
//! 1. flag-change notifications from the [`FlagStore`],
//! 2. insertion records from the [`HostDom`],
//! 3. the periodic [`RescanTimer`].
//!
//! Each [`FeedGuard::tick`] runs every due trigger to completion, in that
//! order, before returning. No trigger blocks and nothing is torn down; the
//! guard lives as long as the page.

use crate::config::QuietfeedConfig;
use crate::controller::{EnablementController, Transition};
use crate::dom::HostDom;
use crate::error::Result;
use crate::model::{Enablement, PostSelector};
use crate::scanner::Scanner;
use crate::state::FilterState;
use crate::store::FlagStore;
use crate::watcher::{MutationWatcher, RescanTimer};
use log::{debug, warn};
use std::time::{Duration, Instant};

/// What one tick did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub hidden: usize,
    pub revealed: usize,
    pub rescanned: bool,
}

pub struct FeedGuard<D: HostDom, S: FlagStore> {
    dom: D,
    store: S,
    scanner: Scanner,
    state: FilterState<D::Node>,
    watcher: MutationWatcher<D::Node>,
    timer: RescanTimer,
    controller: EnablementController,
    started: bool,
}

impl<D: HostDom, S: FlagStore> FeedGuard<D, S> {
    /// Subscribes to flag changes right away, so changes made before
    /// [`FeedGuard::start`] are still applied on the next tick.
    pub fn new(
        dom: D,
        store: S,
        scanner: Scanner,
        selector: PostSelector,
        rescan_interval: Duration,
    ) -> Self {
        let controller = EnablementController::subscribe(&store);
        Self {
            dom,
            store,
            scanner,
            state: FilterState::new(selector, Enablement::Enabled),
            watcher: MutationWatcher::new(),
            timer: RescanTimer::new(rescan_interval),
            controller,
            started: false,
        }
    }

    pub fn from_config(dom: D, store: S, config: &QuietfeedConfig) -> Result<Self> {
        Ok(Self::new(
            dom,
            store,
            Scanner::from_config(config)?,
            config.post_selector(),
            config.rescan_interval(),
        ))
    }

    /// Read the flag, run the initial scan and start both triggers.
    /// Returns the number of posts hidden by the initial scan.
    pub fn start(&mut self, now: Instant) -> usize {
        let enablement = EnablementController::initial(&self.store);
        self.state.set_enablement(enablement);

        // Insertions before the observer existed are covered by the scan.
        self.dom.take_mutations();
        let hidden = self.full_scan();

        self.watcher.observe(self.dom.body());
        self.timer.start(now);
        self.started = true;
        debug!("started with {:?}, {} posts hidden", enablement, hidden);
        hidden
    }

    /// Run every trigger that is due.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        if let Err(e) = self.store.refresh() {
            warn!("could not refresh enabled flag: {}", e);
        }
        for transition in self
            .controller
            .drain(&self.scanner, &mut self.dom, &mut self.state)
        {
            match transition {
                Transition::Enabled { hidden } => report.hidden += hidden,
                Transition::Disabled { revealed } => report.revealed += revealed,
                Transition::Unchanged => {}
            }
        }

        let records = self.dom.take_mutations();
        if !records.is_empty() {
            report.hidden +=
                self.watcher
                    .handle(&self.scanner, &mut self.dom, &mut self.state, records);
        }

        if self.timer.poll(now) {
            report.hidden += self.full_scan();
            report.rescanned = true;
        }
        report
    }

    fn full_scan(&mut self) -> usize {
        let pruned = self.state.registry.prune(&self.dom);
        let body = self.dom.body();
        let hidden = self.scanner.scan(&mut self.dom, &mut self.state, body);
        debug!("full scan: {} hidden, {} stale entries pruned", hidden, pruned);
        hidden
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn enablement(&self) -> Enablement {
        self.state.enablement()
    }

    pub fn state(&self) -> &FilterState<D::Node> {
        &self.state
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The host tree, for the embedder to mutate between ticks.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemDom;
    use crate::store::memory::MemFlagStore;
    use crate::test_utils::{add_post, marked_hidden};

    fn guard(store: MemFlagStore) -> FeedGuard<MemDom, MemFlagStore> {
        FeedGuard::from_config(MemDom::new(), store, &QuietfeedConfig::default()).unwrap()
    }

    #[test]
    fn start_scans_existing_feed() {
        let mut guard = guard(MemFlagStore::new());
        let body = guard.dom().body();
        let post = add_post(guard.dom_mut(), body, "Claude and ChatGPT walk into a bar");

        assert_eq!(guard.start(Instant::now()), 1);
        assert!(guard.is_started());
        assert!(marked_hidden(guard.dom(), post));
    }

    #[test]
    fn start_honours_stored_disabled_flag() {
        let mut guard = guard(MemFlagStore::with_value(false));
        let body = guard.dom().body();
        let post = add_post(guard.dom_mut(), body, "Claude and ChatGPT walk into a bar");

        assert_eq!(guard.start(Instant::now()), 0);
        assert_eq!(guard.enablement(), Enablement::Disabled);
        assert!(!marked_hidden(guard.dom(), post));
    }

    #[test]
    fn tick_reports_rescan_only_when_due() {
        let mut guard = guard(MemFlagStore::new());
        let t0 = Instant::now();
        guard.start(t0);

        assert!(!guard.tick(t0 + Duration::from_millis(500)).rescanned);
        assert!(guard.tick(t0 + Duration::from_millis(2000)).rescanned);
    }

    #[test]
    fn rescan_prunes_destroyed_posts() {
        let mut guard = guard(MemFlagStore::new());
        let body = guard.dom().body();
        let post = add_post(guard.dom_mut(), body, "Fine tuning a model on my tweets");
        let t0 = Instant::now();
        guard.start(t0);
        assert_eq!(guard.state().registry.len(), 1);

        guard.dom_mut().remove(post);
        guard.tick(t0 + Duration::from_secs(2));
        assert!(guard.state().registry.is_empty());
    }
}
