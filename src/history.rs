//! Append-only record of correction runs, persisted as a JSON file.

use crate::Finding;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub content: String,
    pub timestamp: u64,
    pub findings: Vec<Finding>,
    pub readability: f64,
}

/// Capped history store: newest entry first, oldest dropped beyond the cap.
///
/// File access goes through an internal lock, so concurrent saves from
/// in-flight requests never lose entries to a read-modify-write race.
pub struct HistoryStore {
    path: PathBuf,
    limit: usize,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: PathBuf, limit: usize) -> Self {
        Self {
            path,
            limit,
            lock: Mutex::new(()),
        }
    }

    pub fn save(&self, content: &str, findings: &[Finding], readability: f64) -> Result<()> {
        let _guard = self.lock.lock().expect("history lock poisoned");
        let mut entries = self.read_entries()?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        entries.insert(
            0,
            HistoryEntry {
                id: timestamp.to_string(),
                content: content.to_string(),
                timestamp,
                findings: findings.to_vec(),
                readability,
            },
        );
        entries.truncate(self.limit);

        self.write(&entries)
    }

    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        let _guard = self.lock.lock().expect("history lock poisoned");
        self.read_entries()
    }

    pub fn get(&self, id: &str) -> Result<Option<HistoryEntry>> {
        Ok(self.list()?.into_iter().find(|entry| entry.id == id))
    }

    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().expect("history lock poisoned");
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to clear history: {}", self.path.display()))?;
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history: {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history: {}", self.path.display()))
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create history directory")?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(limit: usize) -> (tempfile::TempDir, HistoryStore) {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"), limit);
        (dir, store)
    }

    #[test]
    fn test_save_and_list_newest_first() {
        let (_dir, store) = store(10);
        store.save("premier", &[], 80.0).unwrap();
        store.save("deuxième", &[], 75.0).unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "deuxième");
        assert_eq!(entries[1].content, "premier");
    }

    #[test]
    fn test_limit_drops_oldest() {
        let (_dir, store) = store(3);
        for i in 0..5 {
            store.save(&format!("texte-{i}"), &[], 50.0).unwrap();
        }

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].content, "texte-4");
        assert_eq!(entries[2].content, "texte-2");
    }

    #[test]
    fn test_get_by_id() {
        let (_dir, store) = store(10);
        store.save("contenu", &[], 60.0).unwrap();

        let entries = store.list().unwrap();
        let found = store.get(&entries[0].id).unwrap();
        assert_eq!(found.unwrap().content, "contenu");
        assert!(store.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_saves_keep_every_entry() {
        use std::sync::Arc;

        let dir = tempdir().unwrap();
        let store = Arc::new(HistoryStore::new(dir.path().join("history.json"), 32));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.save(&format!("texte-{i}"), &[], 50.0).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.list().unwrap().len(), 8);
    }

    #[test]
    fn test_clear_removes_everything() {
        let (_dir, store) = store(10);
        store.save("contenu", &[], 60.0).unwrap();
        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }
}
