//! Index backend reading a JSON dump of an index store.
//!
//! The store path is either a single `.json` file or a directory whose
//! `*.json` entries are each one dump. A dump is a unit object, or an array
//! of unit objects:
//!
//! ```json
//! {
//!   "file": "/src/App/ViewController.swift",
//!   "occurrences": [
//!     {
//!       "line": 12,
//!       "column": 23,
//!       "roles": "REFERENCE | CALL",
//!       "isSystem": false,
//!       "symbol": {
//!         "kind": "instanceMethod",
//!         "name": "async(execute:)",
//!         "linkageName": "s:Dispatch.DispatchQueue.async(execute: @escaping () -> ()) -> ()",
//!         "language": "swift"
//!       }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::access::{IndexError, SymbolIndex};
use crate::symbol::Occurrence;

#[derive(Debug, Deserialize)]
struct IndexUnit {
    file: String,
    #[serde(default)]
    occurrences: Vec<Occurrence>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexDump {
    Many(Vec<IndexUnit>),
    One(IndexUnit),
}

type PositionMap = FxHashMap<(u32, u32), Vec<Occurrence>>;

/// Immutable, in-memory symbol index loaded from JSON.
#[derive(Debug, Default)]
pub struct JsonIndexStore {
    files: FxHashMap<String, PositionMap>,
}

impl JsonIndexStore {
    /// Load every unit under `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IndexError::NotFound(path.to_path_buf()));
        }

        let mut store = JsonIndexStore::default();
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| IndexError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let mut unit_paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|entry| entry.extension().is_some_and(|ext| ext == "json"))
                .collect();
            if unit_paths.is_empty() {
                return Err(IndexError::NoUnits(path.to_path_buf()));
            }
            unit_paths.sort();
            for unit_path in unit_paths {
                store.load_file(&unit_path)?;
            }
        } else {
            store.load_file(path)?;
        }

        info!(
            path = %path.display(),
            files = store.file_count(),
            "opened symbol index"
        );
        Ok(store)
    }

    /// Build a store from already-decoded units.
    pub fn from_units<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Occurrence>)>,
        S: AsRef<str>,
    {
        let mut store = JsonIndexStore::default();
        for (file, occurrences) in units {
            store.insert(file.as_ref(), occurrences);
        }
        store
    }

    fn load_file(&mut self, path: &Path) -> Result<(), IndexError> {
        let text = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dump: IndexDump =
            serde_json::from_str(&text).map_err(|source| IndexError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        let units = match dump {
            IndexDump::Many(units) => units,
            IndexDump::One(unit) => vec![unit],
        };
        debug!(path = %path.display(), units = units.len(), "loaded index dump");
        for unit in units {
            self.insert(&unit.file, unit.occurrences);
        }
        Ok(())
    }

    fn insert(&mut self, file: &str, occurrences: Vec<Occurrence>) {
        let positions = self.files.entry(normalize_path(file)).or_default();
        for occurrence in occurrences {
            positions
                .entry((occurrence.line, occurrence.column))
                .or_default()
                .push(occurrence);
        }
    }

    pub(crate) fn file_count(&self) -> usize {
        self.files.len()
    }

    fn positions_for(&self, file: &str) -> Option<&PositionMap> {
        if let Some(positions) = self.files.get(&normalize_path(file)) {
            return Some(positions);
        }
        let canonical = fs::canonicalize(file).ok()?;
        self.files
            .get(&normalize_path(&canonical.to_string_lossy()))
    }
}

impl SymbolIndex for JsonIndexStore {
    fn occurrences_near(
        &self,
        file: &str,
        line: u32,
        column: u32,
    ) -> Result<Vec<Occurrence>, IndexError> {
        let positions = self
            .positions_for(file)
            .ok_or_else(|| IndexError::UnknownFile(file.to_string()))?;
        Ok(positions.get(&(line, column)).cloned().unwrap_or_default())
    }
}

/// Lexically normalize a path: drop `.` components and fold `..`.
pub(crate) fn normalize_path(path: &str) -> String {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}
