//! # Toggle API
//!
//! The toggle surface is a mirror of the persisted flag. It never talks to a
//! running filter; it reads and writes the shared `enabled` key, and the
//! filter follows along through store notifications.
//!
//! `QuietfeedApi<S: FlagStore>` is generic over the store:
//! - Production: `QuietfeedApi<FsFlagStore>`
//! - Testing: `QuietfeedApi<MemFlagStore>`
//!
//! It also exposes the classifier on its own, so a text can be checked
//! against the configured topics without any document at all.

use crate::config::QuietfeedConfig;
use crate::error::Result;
use crate::model::Enablement;
use crate::store::FlagStore;

/// Result of classifying a standalone text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub matched: bool,
    /// Source of the first pattern that hit.
    pub pattern: Option<String>,
}

pub struct QuietfeedApi<S: FlagStore> {
    store: S,
    config: QuietfeedConfig,
}

impl<S: FlagStore> QuietfeedApi<S> {
    pub fn new(store: S, config: QuietfeedConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &QuietfeedConfig {
        &self.config
    }

    pub fn status(&self) -> Result<Enablement> {
        Ok(Enablement::from_stored(self.store.load_enabled()?))
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<Enablement> {
        self.store.store_enabled(enabled)?;
        Ok(Enablement::from(enabled))
    }

    pub fn enable(&self) -> Result<Enablement> {
        self.set_enabled(true)
    }

    pub fn disable(&self) -> Result<Enablement> {
        self.set_enabled(false)
    }

    /// Flip the current state; an unset flag counts as enabled.
    pub fn toggle(&self) -> Result<Enablement> {
        let current = self.status()?;
        self.set_enabled(!current.is_enabled())
    }

    pub fn check(&self, text: &str) -> Result<CheckResult> {
        let matcher = self.config.matcher()?;
        let pattern = matcher.first_match(text).map(|p| p.as_str().to_string());
        Ok(CheckResult {
            matched: pattern.is_some(),
            pattern,
        })
    }
}
