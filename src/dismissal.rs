//! Per-visitor dismissal state.
//!
//! The engine only needs two operations: "is this id dismissed?" and "mark
//! this id dismissed". [`DismissalStore`] captures exactly that, so hosts can
//! back it with whatever they have (browser storage, a session, a file).
//!
//! Two stores ship with the crate:
//!
//! - [`MemoryDismissals`]: an in-process set, for tests and one-shot renders.
//! - [`FileDismissals`]: a JSON file, used by the CLI's `--dismissed` flag.
//!
//! ## File Format
//!
//! ```json
//! { "version": 1, "dismissed": ["welcome", "v2-launch"] }
//! ```
//!
//! A missing, unreadable or version-mismatched file loads as empty, the same
//! as a visitor who never dismissed anything.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version of the dismissal file format.
const FILE_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum DismissalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lookup and update of dismissed announcement ids.
pub trait DismissalStore {
    fn is_dismissed(&self, id: &str) -> bool;
    fn dismiss(&mut self, id: &str) -> Result<(), DismissalError>;
}

/// In-memory dismissal set.
#[derive(Debug, Clone, Default)]
pub struct MemoryDismissals {
    ids: HashSet<String>,
}

impl MemoryDismissals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MemoryDismissals {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl DismissalStore for MemoryDismissals {
    fn is_dismissed(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn dismiss(&mut self, id: &str) -> Result<(), DismissalError> {
        self.ids.insert(id.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DismissalFile {
    version: u32,
    dismissed: BTreeSet<String>,
}

/// Dismissal set persisted as JSON; every [`dismiss`](DismissalStore::dismiss)
/// rewrites the file.
#[derive(Debug, Clone)]
pub struct FileDismissals {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl FileDismissals {
    /// Load from `path`. Returns an empty set if the file doesn't exist or
    /// can't be parsed.
    pub fn load(path: &Path) -> Self {
        let ids = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| match serde_json::from_str::<DismissalFile>(&content) {
                Ok(file) if file.version == FILE_VERSION => Some(file.dismissed),
                Ok(file) => {
                    tracing::warn!(path = %path.display(), version = file.version, "ignoring dismissal file with unknown version");
                    None
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "ignoring unreadable dismissal file: {err}");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            ids,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    fn save(&self) -> Result<(), DismissalError> {
        let file = DismissalFile {
            version: FILE_VERSION,
            dismissed: self.ids.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl DismissalStore for FileDismissals {
    fn is_dismissed(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn dismiss(&mut self, id: &str) -> Result<(), DismissalError> {
        if !self.ids.insert(id.to_string()) {
            return Ok(());
        }
        // Memory never claims a dismissal the file doesn't have.
        if let Err(err) = self.save() {
            self.ids.remove(id);
            return Err(err);
        }
        Ok(())
    }
}
