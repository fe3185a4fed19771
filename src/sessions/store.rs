//! Saved configuration stores

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::saved::{demo_configurations, SavedConfiguration};
use crate::errors::{HrbridgeError, Result};

/// Persistence collaborator for saved configurations
pub trait ConfigStore {
    /// Insert, or replace the entry with the same id
    fn save(&mut self, config: SavedConfiguration) -> Result<()>;

    fn list(&self) -> Result<Vec<SavedConfiguration>>;

    /// Look up by id, falling back to a case-insensitive name match
    fn load(&self, key: &str) -> Result<SavedConfiguration> {
        let all = self.list()?;
        all.iter()
            .find(|c| c.id == key)
            .or_else(|| all.iter().find(|c| c.matches(key)))
            .cloned()
            .ok_or_else(|| HrbridgeError::NotFound(key.to_string()))
    }

    fn delete(&mut self, key: &str) -> Result<SavedConfiguration>;
}

fn upsert(list: &mut Vec<SavedConfiguration>, config: SavedConfiguration) {
    match list.iter_mut().find(|c| c.id == config.id) {
        Some(existing) => *existing = config,
        None => list.push(config),
    }
}

fn take(list: &mut Vec<SavedConfiguration>, key: &str) -> Result<SavedConfiguration> {
    let pos = list
        .iter()
        .position(|c| c.id == key)
        .or_else(|| list.iter().position(|c| c.matches(key)))
        .ok_or_else(|| HrbridgeError::NotFound(key.to_string()))?;
    Ok(list.remove(pos))
}

/// In-memory store, mostly for tests and one-off sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    configs: Vec<SavedConfiguration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demos() -> Self {
        Self {
            configs: demo_configurations(),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn save(&mut self, config: SavedConfiguration) -> Result<()> {
        upsert(&mut self.configs, config);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedConfiguration>> {
        Ok(self.configs.clone())
    }

    fn delete(&mut self, key: &str) -> Result<SavedConfiguration> {
        take(&mut self.configs, key)
    }
}

/// JSON file store. A missing file reads as the demo configurations.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<SavedConfiguration>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no store file yet, using demo configurations");
            return Ok(demo_configurations());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            HrbridgeError::Store(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            warn!(path = %self.path.display(), "store file is empty");
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            HrbridgeError::Store(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn write(&self, configs: &[SavedConfiguration]) -> Result<()> {
        write_json_atomic(&self.path, &configs)
    }
}

impl ConfigStore for FileStore {
    fn save(&mut self, config: SavedConfiguration) -> Result<()> {
        let mut configs = self.read()?;
        info!(id = %config.id, name = %config.name, "saving configuration");
        upsert(&mut configs, config);
        self.write(&configs)
    }

    fn list(&self) -> Result<Vec<SavedConfiguration>> {
        self.read()
    }

    fn delete(&mut self, key: &str) -> Result<SavedConfiguration> {
        let mut configs = self.read()?;
        let removed = take(&mut configs, key)?;
        self.write(&configs)?;
        info!(id = %removed.id, "configuration deleted");
        Ok(removed)
    }
}

/// Write pretty JSON through a temp file and an atomic rename.
/// On Unix the result is readable by the owner only.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|e| HrbridgeError::Store(format!("Failed to create directory: {}", e)))?;

    let content = serde_json::to_string_pretty(value)?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| HrbridgeError::Store(format!("Failed to create temp file: {}", e)))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| HrbridgeError::Store(format!("Failed to write: {}", e)))?;
    temp.persist(path)
        .map_err(|e| HrbridgeError::Store(format!("Failed to save {}: {}", path.display(), e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        let _ = std::fs::set_permissions(path, permissions);
    }

    Ok(())
}

/// Write a single configuration to its own file
pub fn export_configuration(config: &SavedConfiguration, path: &Path) -> Result<()> {
    write_json_atomic(path, config)
}

/// Read a single configuration file. An id already present in `store`
/// is replaced by a fresh one so the import never overwrites.
pub fn import_configuration(store: &mut dyn ConfigStore, path: &Path) -> Result<SavedConfiguration> {
    let content = fs::read_to_string(path)?;
    let mut config: SavedConfiguration = serde_json::from_str(&content)?;
    if config.name.trim().is_empty() {
        return Err(crate::wizard::ValidationError::ConfigNameRequired.into());
    }
    if store.list()?.iter().any(|c| c.id == config.id) {
        config.id = uuid::Uuid::new_v4().to_string();
    }
    store.save(config.clone())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardState;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        let config = WizardState::new().snapshot("Mine").unwrap();
        store.save(config.clone()).unwrap();
        assert_eq!(store.load(&config.id).unwrap(), config);
        assert_eq!(store.load("mine").unwrap().id, config.id);

        let mut renamed = config.clone();
        renamed.name = "Renamed".to_string();
        store.save(renamed).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);

        store.delete(&config.id).unwrap();
        assert!(matches!(store.load(&config.id), Err(HrbridgeError::NotFound(_))));
    }

    #[test]
    fn test_file_store_missing_file_has_demos() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("configurations.json"));
        let list = store.list().unwrap();
        assert_eq!(list.len(), 3);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("configurations.json");
        let mut store = FileStore::new(&path);
        let config = WizardState::new().snapshot("Persisted").unwrap();
        store.save(config.clone()).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.list().unwrap().len(), 4);
        assert_eq!(reopened.load("Persisted").unwrap(), config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("configurations.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::new(&path).list(), Err(HrbridgeError::Store(_))));
    }

    #[test]
    fn test_export_import_gets_fresh_id() {
        let dir = TempDir::new().unwrap();
        let mut store = MemoryStore::with_demos();
        let exported = store.load("1").unwrap();
        let path = dir.path().join("one.json");
        export_configuration(&exported, &path).unwrap();

        let imported = import_configuration(&mut store, &path).unwrap();
        assert_ne!(imported.id, "1");
        assert_eq!(imported.name, exported.name);
        assert_eq!(store.list().unwrap().len(), 4);
    }
}
