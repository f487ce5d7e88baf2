use anyhow::Result;
use chrono::Utc;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::catalog::GenerationKind;

/// Collection cap; the oldest entry is evicted on overflow.
pub const MAX_HISTORY_ITEMS: usize = 10;

/// One successful generation, immutable once recorded. Entries are only
/// ever bulk-cleared, never deleted individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: GenerationKind,
    pub content: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub title: String,
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join("history.json") }
    }

    /// Missing or unreadable files read as an empty history.
    pub fn load(&self) -> Vec<HistoryItem> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    /// Prepend a new entry and persist, evicting past the cap.
    pub fn record(&self, kind: GenerationKind, title: &str, content: &str) -> Result<HistoryItem> {
        let item = HistoryItem {
            id: Uuid::new_v4(),
            kind,
            content: content.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            title: title.to_string(),
        };

        let mut items = self.load();
        items.insert(0, item.clone());
        items.truncate(MAX_HISTORY_ITEMS);
        self.save(&items)?;
        Ok(item)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_caps_at_ten_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        for i in 0..11 {
            store
                .record(GenerationKind::Readme, &format!("item {i}"), "body")
                .unwrap();
        }

        let items = store.load();
        assert_eq!(items.len(), MAX_HISTORY_ITEMS);
        assert_eq!(items[0].title, "item 10");
        assert_eq!(items[9].title, "item 1");
    }

    #[test]
    fn clear_empties_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        store.record(GenerationKind::License, "t", "c").unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        store.record(GenerationKind::Gitignore, "t", "c").unwrap();
        let raw = fs::read_to_string(dir.path().join("history.json")).unwrap();
        assert!(raw.contains(r#""type": "gitignore""#));
    }
}
