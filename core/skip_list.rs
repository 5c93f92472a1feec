use crate::CoreError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SKIP_LIST: &str = "skiplist.txt";

/// Files excluded from analysis, stored in canonical form.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    entries: HashSet<PathBuf>,
}

impl SkipList {
    /// Reads one path per line from `path`. Relative entries are resolved
    /// against `base`. A missing skip list file yields an empty list;
    /// entries that do not name an existing file are dropped with a warning.
    pub fn load(path: &Path, base: &Path) -> Result<Self, CoreError> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no skip list found");
            return Ok(SkipList::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, base))
    }

    pub fn parse(content: &str, base: &Path) -> Self {
        let mut entries = HashSet::new();
        for line in content.lines() {
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            let candidate = Path::new(entry);
            let resolved = if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                base.join(candidate)
            };
            if !resolved.is_file() {
                tracing::warn!("Skip list entry '{}' not found, ignoring", entry);
                continue;
            }
            entries.insert(canonical(&resolved));
        }
        SkipList { entries }
    }

    pub fn contains(&self, path: &Path) -> bool {
        !self.entries.is_empty() && self.entries.contains(&canonical(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
