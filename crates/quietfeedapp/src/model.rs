/// The value written to the hidden marker attribute.
pub const HIDDEN_MARKER_VALUE: &str = "true";

/// Locates post roots in the host tree and names the hidden marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSelector {
    pub tag: String,
    pub attr: String,
    pub value: String,
    pub hidden_attr: String,
}

impl Default for PostSelector {
    fn default() -> Self {
        Self {
            tag: "article".to_string(),
            attr: "data-testid".to_string(),
            value: "tweet".to_string(),
            hidden_attr: "data-ai-blocker-hidden".to_string(),
        }
    }
}

/// CSS `display` states quietfeed is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline override; the page's own styling applies.
    #[default]
    Default,
    /// `display: none`.
    Hidden,
}

/// One batch of insertions observed under a single parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord<N> {
    pub target: N,
    pub added_nodes: Vec<N>,
}

/// Two-state enablement of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    Enabled,
    Disabled,
}

impl Enablement {
    pub fn is_enabled(self) -> bool {
        matches!(self, Enablement::Enabled)
    }

    /// Map a persisted value to a state. A missing value means enabled.
    pub fn from_stored(value: Option<bool>) -> Self {
        match value {
            Some(false) => Enablement::Disabled,
            _ => Enablement::Enabled,
        }
    }
}

impl From<bool> for Enablement {
    fn from(enabled: bool) -> Self {
        if enabled {
            Enablement::Enabled
        } else {
            Enablement::Disabled
        }
    }
}

/// A change to the persisted `enabled` key, as delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagChange {
    pub old_value: Option<bool>,
    pub new_value: Option<bool>,
}
