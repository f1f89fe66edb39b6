//! Remembered control selections
//!
//! Each selection control persists its last user-chosen value under a key of
//! the form `"<Page>.<Field>"`. Keys are part of the on-disk format: renaming
//! one drops every user's saved choice for that control.

use anyhow::Result;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const START_QUARTER_KEY: &str = "BasicSearch.StartQuarter";
pub const END_QUARTER_KEY: &str = "BasicSearch.EndQuarter";
pub const SUBJECT_KEY: &str = "BasicSearch.Subject";
pub const COURSE_DETAILS_QUARTER_KEY: &str = "CourseDetails.Quarter";
pub const PERSONAL_SCHEDULE_KEY: &str = "AddToScheduleModal.PersonalSchedule";

/// Durable key-value storage for control preferences
///
/// `set` must be visible to the next `get`, including after a restart.
/// Writes never fail from the caller's point of view; an implementation that
/// cannot persist keeps the value in memory and logs the problem.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Handle shared by every component that persists a selection
pub type SharedPreferences = Rc<dyn PreferenceStore>;

/// File name of the durable store inside the config directory
pub const PREFERENCES_FILE: &str = "preferences.json";

/// The store for this run: on disk under `config_dir`, or in memory when
/// there is nowhere to keep it
pub fn open_store(config_dir: Option<&Path>) -> SharedPreferences {
    match config_dir {
        Some(dir) => Rc::new(JsonFilePreferenceStore::open(dir.join(PREFERENCES_FILE))),
        None => {
            warn!("No config directory; selections last for this session only");
            Rc::new(MemoryPreferenceStore::new())
        }
    }
}

/// Non-durable store for tests and home-less environments
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Store backed by a JSON object on disk, rewritten on every `set`
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
}

impl JsonFilePreferenceStore {
    /// Open the store at `path`, starting empty if the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        debug!(
            "Loaded {} preference(s) from {}",
            values.len(),
            path.display()
        );
        Self {
            path,
            values: RefCell::new(values),
        }
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }

        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Could not read preferences {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring malformed preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(&*self.values.borrow())?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist() {
            warn!(
                "Failed to save preference {} to {}: {}",
                key,
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_set_then_get() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get(SUBJECT_KEY), None);

        store.set(SUBJECT_KEY, "CMPSC");
        assert_eq!(store.get(SUBJECT_KEY).as_deref(), Some("CMPSC"));

        store.set(SUBJECT_KEY, "MATH");
        assert_eq!(store.get(SUBJECT_KEY).as_deref(), Some("MATH"));
    }

    #[test]
    fn test_memory_store_accepts_arbitrary_strings() {
        let store = MemoryPreferenceStore::new();
        for (k, v) in [("", ""), ("a.b", "  spaced  "), ("ünïcode", "値")] {
            store.set(k, v);
            assert_eq!(store.get(k).as_deref(), Some(v));
        }
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = JsonFilePreferenceStore::open(&path);
        assert_eq!(store.get(START_QUARTER_KEY), None);
        store.set(START_QUARTER_KEY, "20221");
        store.set(END_QUARTER_KEY, "20224");
        assert!(path.exists());

        let reopened = JsonFilePreferenceStore::open(&path);
        assert_eq!(reopened.get(START_QUARTER_KEY).as_deref(), Some("20221"));
        assert_eq!(reopened.get(END_QUARTER_KEY).as_deref(), Some("20224"));
    }

    #[test]
    fn test_file_store_ignores_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFilePreferenceStore::open(&path);
        assert_eq!(store.get(SUBJECT_KEY), None);

        store.set(SUBJECT_KEY, "ANTH");
        let reopened = JsonFilePreferenceStore::open(&path);
        assert_eq!(reopened.get(SUBJECT_KEY).as_deref(), Some("ANTH"));
    }

    #[test]
    fn test_open_store_with_and_without_directory() {
        let dir = TempDir::new().unwrap();
        let store = open_store(Some(dir.path()));
        store.set(SUBJECT_KEY, "MATH");
        assert!(dir.path().join(PREFERENCES_FILE).exists());
        assert_eq!(
            open_store(Some(dir.path())).get(SUBJECT_KEY).as_deref(),
            Some("MATH")
        );

        let session = open_store(None);
        session.set(SUBJECT_KEY, "CHEM");
        assert_eq!(session.get(SUBJECT_KEY).as_deref(), Some("CHEM"));
        assert_eq!(open_store(None).get(SUBJECT_KEY), None);
    }

    #[test]
    fn test_file_store_keeps_value_when_write_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let store = JsonFilePreferenceStore::open(blocker.join("preferences.json"));
        store.set(SUBJECT_KEY, "CHEM");
        assert_eq!(store.get(SUBJECT_KEY).as_deref(), Some("CHEM"));
    }
}
