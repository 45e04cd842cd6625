use crate::error::{StorageError, ValidationError};
use crate::utils::non_empty_trimmed;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const SESSION_FILE: &str = "session.toml";

/// Everything needed to address the remote table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub token: String,
    pub base_id: String,
    pub table_name: String,
}

impl Config {
    /// Builds a configuration from raw form input. All three fields are trimmed and must be non-empty.
    pub fn from_input(token: &str, base_id: &str, table_name: &str) -> Result<Self, ValidationError> {
        match (
            non_empty_trimmed(token),
            non_empty_trimmed(base_id),
            non_empty_trimmed(table_name),
        ) {
            (Some(token), Some(base_id), Some(table_name)) => Ok(Self { token, base_id, table_name }),
            _ => Err(ValidationError::IncompleteConfig),
        }
    }

    fn is_complete(&self) -> bool {
        Self::from_input(&self.token, &self.base_id, &self.table_name).as_ref() == Ok(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .finish()
    }
}

/// Session-scoped home of the configuration. Absence means "not configured".
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<Config>;
    fn save(&self, config: &Config) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// TOML file inside the per-user runtime directory, which is emptied when the login session ends.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "AirtableContactsGTK")?;
        Some(proj.runtime_dir()?.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Config> {
        let text = fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<Config>(&text) {
            Ok(config) if config.is_complete() => Some(config),
            Ok(_) => {
                log::warn!("Ignoring incomplete session file {}", self.path.display());
                None
            }
            Err(e) => {
                log::warn!("Ignoring malformed session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, config: &Config) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(config)?;
        fs::write(&self.path, text)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-lifetime slot, used when the platform has no runtime directory and by tests.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Config>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { slot: Mutex::new(Some(config)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Config> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, config: &Config) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(config.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

pub fn session_store() -> Box<dyn SessionStore> {
    match FileSessionStore::default_path() {
        Some(path) => Box::new(FileSessionStore::new(path)),
        None => {
            log::info!("No runtime directory available, keeping the session in memory");
            Box::new(MemorySessionStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::from_input("t1", "appXXX", "Contacts").unwrap()
    }

    #[test]
    fn from_input_trims_every_field() {
        let cfg = Config::from_input("  t1 ", "\tappXXX", "Contacts \n").unwrap();
        assert_eq!(cfg.token, "t1");
        assert_eq!(cfg.base_id, "appXXX");
        assert_eq!(cfg.table_name, "Contacts");
    }

    #[test]
    fn from_input_rejects_any_blank_field() {
        for (t, b, n) in [("", "app", "T"), ("t", "  ", "T"), ("t", "app", "")] {
            assert_eq!(Config::from_input(t, b, n), Err(ValidationError::IncompleteConfig));
        }
    }

    #[test]
    fn debug_output_hides_token() {
        let out = format!("{:?}", sample());
        assert!(!out.contains("t1"));
        assert!(out.contains("appXXX"));
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join(SESSION_FILE));
        assert!(store.load().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));

        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join(SESSION_FILE));
        store.save(&sample()).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("baseId"));
        assert!(text.contains("tableName"));
    }

    #[test]
    fn file_store_ignores_malformed_or_incomplete_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        let store = FileSessionStore::new(&path);

        fs::write(&path, "not = [valid").unwrap();
        assert!(store.load().is_none());

        fs::write(&path, "token = \"t1\"\nbaseId = \"\"\ntableName = \"Contacts\"\n").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn memory_store_holds_one_config() {
        let store = MemorySessionStore::new();
        assert!(store.load().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
