use crate::model::{Enablement, PostSelector};
use crate::registry::PostRegistry;
use std::hash::Hash;

/// Mutable filter state shared by every trigger.
///
/// Scans, hide actions and enablement transitions all receive this by
/// `&mut`, so the flag they read is always the current one.
#[derive(Debug, Clone)]
pub struct FilterState<N> {
    pub selector: PostSelector,
    pub registry: PostRegistry<N>,
    enablement: Enablement,
}

impl<N: Copy + Eq + Hash> FilterState<N> {
    pub fn new(selector: PostSelector, enablement: Enablement) -> Self {
        Self {
            selector,
            registry: PostRegistry::new(),
            enablement,
        }
    }

    pub fn enablement(&self) -> Enablement {
        self.enablement
    }

    pub fn is_enabled(&self) -> bool {
        self.enablement.is_enabled()
    }

    /// Only the enablement controller should call this; it also runs the
    /// scan or reveal a transition implies.
    pub(crate) fn set_enablement(&mut self, enablement: Enablement) {
        self.enablement = enablement;
    }
}
