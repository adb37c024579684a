//! Directory-backed storage of named asset records.
//!
//! Every record lives in its own `<name>.toml` file. The store knows nothing
//! about the record shape; callers pick the type to read or write.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AssetError;

/// File extension of stored records.
pub const RECORD_EXTENSION: &str = "toml";

/// A directory of named records.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
    kind: &'static str,
}

impl LocalStore {
    /// Creates a store over `dir`. `kind` names the records in errors
    /// (`"turbine"`, `"panel"`).
    pub fn new(dir: impl Into<PathBuf>, kind: &'static str) -> Self {
        Self {
            dir: dir.into(),
            kind,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a record named `name` is stored under.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{RECORD_EXTENSION}"))
    }

    /// Reads and parses the record named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::NotFound`] if no such file exists and
    /// [`AssetError::Parse`] if its content does not match `T`.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, AssetError> {
        let path = self.path_for(name);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            },
            _ => AssetError::Io {
                path: path.clone(),
                source: e,
            },
        })?;
        toml::from_str(&content).map_err(|e| AssetError::Parse {
            path,
            message: e.to_string(),
        })
    }

    /// Writes `record` as `<stem>.toml`, creating the directory if needed,
    /// and returns the written path.
    pub fn write<T: Serialize>(&self, stem: &str, record: &T) -> Result<PathBuf, AssetError> {
        let content =
            toml::to_string_pretty(record).map_err(|e| AssetError::Serialize(e.to_string()))?;
        fs::create_dir_all(&self.dir).map_err(|e| AssetError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.path_for(stem);
        fs::write(&path, content).map_err(|e| AssetError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Names of all records currently in the directory, without reading them.
    ///
    /// A missing directory yields an empty set.
    pub fn list(&self) -> Result<BTreeSet<String>, AssetError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => {
                return Err(AssetError::Io {
                    path: self.dir.clone(),
                    source: e,
                });
            }
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let path = entry
                .map_err(|e| AssetError::Io {
                    path: self.dir.clone(),
                    source: e,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }
        Ok(names)
    }
}

/// File stem for a turbine downloaded from the catalog:
/// `<manufacturer>_<name>` with `/`, space and `-` replaced by `_`.
pub fn record_file_stem(manufacturer: &str, name: &str) -> String {
    format!("{manufacturer}_{name}")
        .chars()
        .map(|c| match c {
            '/' | ' ' | '-' => '_',
            other => other,
        })
        .collect()
}
