//! Persisted workspace names.
//!
//! The names live in a small JSON document with a single key:
//!
//! ```json
//! {
//!   "workspace_names": [
//!     "Web",
//!     "Chat"
//!   ]
//! }
//! ```
//!
//! Index 0 is workspace 1.  The list may be shorter than the number of live
//! workspaces; missing entries are shown as `"Workspace N"`.  Every mutation
//! is followed by a full-file overwrite, with no locking: if another editor
//! touches the file concurrently, the last writer wins.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default label for the 1-based workspace `number`.
pub fn default_name(number: usize) -> String {
    format!("Workspace {}", number)
}

/// On-disk document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct NamesDocument {
    #[serde(rename = "workspace_names", default)]
    names: Vec<String>,
}

/// Errors from reading or writing the names document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to the ordered list of workspace names and the file backing it.
///
/// There is no global instance; callers load a store and pass it to every
/// operation that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct NameStore {
    path: PathBuf,
    names: Vec<String>,
}

impl NameStore {
    /// Load the store from `path`.
    ///
    /// A missing file is seeded with two default names and written
    /// immediately.  A file that exists but is not valid JSON is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no names file at {}, seeding defaults", path.display());
                let store = Self {
                    path,
                    names: vec![default_name(1), default_name(2)],
                };
                store.save()?;
                return Ok(store);
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let doc: NamesDocument = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Parse { path: path.clone(), source })?;
        debug!("loaded {} name(s) from {}", doc.names.len(), path.display());
        Ok(Self {
            path,
            names: doc.names,
        })
    }

    /// Overwrite the backing file with the current list, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let doc = NamesDocument {
            names: self.names.clone(),
        };
        let mut json = serde_json::to_string_pretty(&doc).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');
        std::fs::write(&self.path, json).map_err(io_err)?;
        debug!("saved {} name(s) to {}", self.names.len(), self.path.display());
        Ok(())
    }

    /// The file this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored names, in workspace order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Stored name at 0-based `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Stored name at 0-based `index`, or its default label.
    pub fn label(&self, index: usize) -> String {
        self.get(index)
            .map(str::to_string)
            .unwrap_or_else(|| default_name(index + 1))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append default names until the list holds at least `len` entries.
    pub fn pad_to(&mut self, len: usize) {
        while self.names.len() < len {
            let next = default_name(self.names.len() + 1);
            self.names.push(next);
        }
    }

    /// Replace the name at 0-based `index`, padding first if needed.
    pub fn set(&mut self, index: usize, name: impl Into<String>) {
        self.pad_to(index + 1);
        self.names[index] = name.into();
    }

    /// Swap the names at two 0-based positions, padding first if needed.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.pad_to(a.max(b) + 1);
        self.names.swap(a, b);
    }

    /// Remove and return the name at 0-based `index`, if one is stored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.names.len() {
            Some(self.names.remove(index))
        } else {
            None
        }
    }
}
