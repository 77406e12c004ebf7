//! # Configuration
//!
//! Quietfeed configuration is managed by [`confique`], loaded from an optional
//! `quietfeed.toml` in the data directory. Anything not set falls back to the
//! compiled defaults below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `min_text_len` | `10` | Texts shorter than this never match |
//! | `scan_min_text_len` | `20` | Bulk scans skip posts whose text is not longer than this |
//! | `rescan_interval_ms` | `2000` | Period of the full-feed backstop rescan |
//! | `post_tag` | `article` | Tag of a post root |
//! | `post_attr` | `data-testid` | Structural attribute identifying a post root |
//! | `post_attr_value` | `tweet` | Value of `post_attr` on a post root |
//! | `hidden_attr` | `data-ai-blocker-hidden` | Marker set on posts hidden by quietfeed |
//! | `extra_patterns` | none | Additional case-insensitive topic regexes |

use crate::error::Result;
use crate::matcher::PatternMatcher;
use crate::model::PostSelector;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "quietfeed.toml";

/// Configuration for quietfeed, stored in `quietfeed.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuietfeedConfig {
    /// Minimum length (in characters) a text needs before any pattern is tried.
    #[config(default = 10)]
    pub min_text_len: usize,

    /// Bulk scans only classify posts whose text is strictly longer than this.
    #[config(default = 20)]
    pub scan_min_text_len: usize,

    /// Full rescan period in milliseconds.
    #[config(default = 2000)]
    pub rescan_interval_ms: u64,

    #[config(default = "article")]
    pub post_tag: String,

    #[config(default = "data-testid")]
    pub post_attr: String,

    #[config(default = "tweet")]
    pub post_attr_value: String,

    #[config(default = "data-ai-blocker-hidden")]
    pub hidden_attr: String,

    /// Extra topic regexes appended after the built-in set.
    pub extra_patterns: Option<Vec<String>>,
}

impl Default for QuietfeedConfig {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            scan_min_text_len: 20,
            rescan_interval_ms: 2000,
            post_tag: "article".to_string(),
            post_attr: "data-testid".to_string(),
            post_attr_value: "tweet".to_string(),
            hidden_attr: "data-ai-blocker-hidden".to_string(),
            extra_patterns: None,
        }
    }
}

impl QuietfeedConfig {
    /// Load `quietfeed.toml` from `dir`, or the defaults when there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(Self::builder().file(path).load()?)
    }

    pub fn rescan_interval(&self) -> Duration {
        Duration::from_millis(self.rescan_interval_ms)
    }

    pub fn post_selector(&self) -> PostSelector {
        PostSelector {
            tag: self.post_tag.clone(),
            attr: self.post_attr.clone(),
            value: self.post_attr_value.clone(),
            hidden_attr: self.hidden_attr.clone(),
        }
    }

    /// Build the matcher: the built-in topics followed by `extra_patterns`.
    pub fn matcher(&self) -> Result<PatternMatcher> {
        let mut matcher = PatternMatcher::default_topics().with_min_len(self.min_text_len);
        for pattern in self.extra_patterns.iter().flatten() {
            matcher.push_pattern(pattern)?;
        }
        Ok(matcher)
    }
}
