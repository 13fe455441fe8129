use std::{
    ffi::OsString,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::model::PolicyModel;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ModelStoreError {
    #[display("failed to read model file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to write model file {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("malformed model file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to serialize model")]
    Serialize { source: serde_json::Error },
    #[display("unsupported model version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[display("model was trained on {found} state features but the board encodes {expected}")]
    ShapeMismatch { expected: usize, found: usize },
}

/// Load/save of a [`PolicyModel`].
pub trait ModelStore: fmt::Debug {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<PolicyModel>, ModelStoreError>;

    fn save(&mut self, model: &PolicyModel) -> Result<(), ModelStoreError>;
}

/// Stores the model as pretty-printed JSON in a single file.
///
/// Saving writes a sibling `.tmp` file first and renames it over the target,
/// so an interrupted save leaves the previous model intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ModelStore for JsonFileStore {
    fn load(&self) -> Result<Option<PolicyModel>, ModelStoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ModelStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let model = serde_json::from_str(&json).map_err(|source| ModelStoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(model))
    }

    fn save(&mut self, model: &PolicyModel) -> Result<(), ModelStoreError> {
        let mut json = serde_json::to_string_pretty(model)
            .map_err(|source| ModelStoreError::Serialize { source })?;
        json.push('\n');

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|source| ModelStoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| ModelStoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), episodes = model.episodes, "model saved");
        Ok(())
    }
}

/// Keeps the last saved model in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    model: Option<PolicyModel>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_model(model: PolicyModel) -> Self {
        Self {
            model: Some(model),
            saves: 0,
        }
    }

    /// Number of times [`ModelStore::save`] was called.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ModelStore for MemoryStore {
    fn load(&self) -> Result<Option<PolicyModel>, ModelStoreError> {
        Ok(self.model.clone())
    }

    fn save(&mut self, model: &PolicyModel) -> Result<(), ModelStoreError> {
        self.model = Some(model.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Policy, PolicyKind};

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("model.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("model.json"));
        let model = PolicyModel::new(Policy::new(PolicyKind::Tabular, 8), 8, 3);

        store.save(&model).unwrap();
        assert_eq!(store.load().unwrap(), Some(model));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_replaces_previous_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("model.json"));
        store
            .save(&PolicyModel::new(Policy::new(PolicyKind::Linear, 2), 2, 1))
            .unwrap();
        let second = PolicyModel::new(Policy::new(PolicyKind::Linear, 2), 2, 2);
        store.save(&second).unwrap();
        assert_eq!(store.load().unwrap().map(|m| m.episodes), Some(2));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, ModelStoreError::Parse { .. }));
        assert!(err.to_string().starts_with("malformed model file"));
    }

    #[test]
    fn test_unwritable_location_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("missing-dir").join("model.json"));
        let model = PolicyModel::new(Policy::new(PolicyKind::Linear, 1), 1, 0);
        assert!(matches!(
            store.save(&model),
            Err(ModelStoreError::Write { .. })
        ));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        let model = PolicyModel::new(Policy::new(PolicyKind::Linear, 1), 1, 0);
        store.save(&model).unwrap();
        store.save(&model).unwrap();
        assert_eq!(store.saves(), 2);
        assert_eq!(store.load().unwrap(), Some(model));
    }
}
