//! Bookmarked classes, persisted behind a small key-value interface.
//!
//! The core only needs add (dedup by pair), remove, and enumerate; the
//! storage backing is swappable through [`BookmarkStore`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// One bookmarked `{department, course}` pair. Uniqueness is by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub department: String,
    pub course: String,
}

/// Get/set interface over the persisted bookmark list.
pub trait BookmarkStore {
    fn load(&self) -> Result<Vec<Bookmark>>;
    fn save(&self, bookmarks: &[Bookmark]) -> Result<()>;
}

/// JSON-file-backed store; a missing file reads as an empty list.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl BookmarkStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Bookmark>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let body = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(bookmarks)?)?;
        Ok(())
    }
}

/// The ordered bookmark list plus its backing store.
pub struct Bookmarks<S: BookmarkStore> {
    store: S,
    entries: Vec<Bookmark>,
}

impl<S: BookmarkStore> Bookmarks<S> {
    pub fn open(store: S) -> Result<Self> {
        let entries = store.load()?;
        Ok(Bookmarks { store, entries })
    }

    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    /// Adds the pair if not already bookmarked. Returns `false` (without
    /// writing) on a duplicate.
    pub fn add(&mut self, department: &str, course: &str) -> Result<bool> {
        if self.position(department, course).is_some() {
            return Ok(false);
        }
        self.entries.push(Bookmark {
            department: department.to_string(),
            course: course.to_string(),
        });
        self.store.save(&self.entries)?;
        Ok(true)
    }

    /// Removes the pair. Returns `false` when it was not bookmarked.
    pub fn remove(&mut self, department: &str, course: &str) -> Result<bool> {
        let Some(pos) = self.position(department, course) else {
            return Ok(false);
        };
        self.entries.remove(pos);
        self.store.save(&self.entries)?;
        Ok(true)
    }

    fn position(&self, department: &str, course: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|b| b.department == department && b.course == course)
    }
}
