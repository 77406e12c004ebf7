use super::{broadcast, FlagStore, ENABLED_KEY};
use crate::error::{QuietfeedError, Result};
use crate::model::FlagChange;
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use uuid::Uuid;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Platform data directory for quietfeed, if one can be determined.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "quietfeed", "quietfeed").map(|dirs| dirs.data_dir().to_path_buf())
}

#[derive(Default)]
struct Watch {
    /// Last value read or written through this handle. `None` until the
    /// file has been looked at once.
    last_seen: Option<Option<bool>>,
    subscribers: Vec<Sender<FlagChange>>,
}

/// Flag store backed by `settings.json` in a data directory.
///
/// The file is a JSON object; keys other than `enabled` are preserved on
/// write. A non-boolean `enabled` reads as unset.
pub struct FsFlagStore {
    root: PathBuf,
    watch: RefCell<Watch>,
}

impl FsFlagStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            watch: RefCell::new(Watch::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    fn read_settings(&self) -> Result<Map<String, Value>> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&path).map_err(QuietfeedError::Io)?;
        match serde_json::from_str(&content).map_err(QuietfeedError::Serialization)? {
            Value::Object(map) => Ok(map),
            _ => Err(QuietfeedError::Store(format!(
                "{} is not a JSON object",
                path.display()
            ))),
        }
    }

    fn write_settings(&self, settings: &Map<String, Value>) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(QuietfeedError::Io)?;
        }
        let content = serde_json::to_string_pretty(settings).map_err(QuietfeedError::Serialization)?;

        let tmp_file = self.root.join(format!(".settings-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(QuietfeedError::Io)?;
        fs::rename(&tmp_file, self.settings_path()).map_err(QuietfeedError::Io)?;
        Ok(())
    }

    /// Record `value` as seen, notifying subscribers when it differs from the
    /// previous sighting.
    fn observe(&self, value: Option<bool>) {
        let mut watch = self.watch.borrow_mut();
        let previous = watch.last_seen.replace(value);
        if let Some(old_value) = previous {
            if old_value != value {
                broadcast(
                    &mut watch.subscribers,
                    FlagChange {
                        old_value,
                        new_value: value,
                    },
                );
            }
        }
    }
}

fn enabled_of(settings: &Map<String, Value>) -> Option<bool> {
    settings.get(ENABLED_KEY).and_then(Value::as_bool)
}

impl FlagStore for FsFlagStore {
    fn load_enabled(&self) -> Result<Option<bool>> {
        let value = enabled_of(&self.read_settings()?);
        self.observe(value);
        Ok(value)
    }

    fn store_enabled(&self, enabled: bool) -> Result<()> {
        let mut settings = self.read_settings()?;
        let old_value = enabled_of(&settings);
        settings.insert(ENABLED_KEY.to_string(), Value::Bool(enabled));
        self.write_settings(&settings)?;

        // A write always notifies relative to what was on disk, even if this
        // handle never read it.
        let mut watch = self.watch.borrow_mut();
        watch.last_seen = Some(Some(enabled));
        if old_value != Some(enabled) {
            broadcast(
                &mut watch.subscribers,
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
        self.watch.borrow_mut().subscribers.push(tx);
        rx
    }

    fn refresh(&self) -> Result<()> {
        let value = enabled_of(&self.read_settings()?);
        self.observe(value);
        Ok(())
    }
}
