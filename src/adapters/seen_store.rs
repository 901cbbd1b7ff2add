use crate::domain::model::SeenSet;
use crate::domain::ports::SeenStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Flat UTF-8 file holding one seen name per line.
#[derive(Debug, Clone)]
pub struct FileSeenStore {
    path: PathBuf,
}

impl FileSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SeenStore for FileSeenStore {
    async fn load(&self) -> Result<SeenSet> {
        if !fs::try_exists(&self.path).await? {
            tracing::debug!("No seen file at {}, starting empty", self.path.display());
            return Ok(SeenSet::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Rewrites the whole file; the temp file and rename keep a crash from truncating it.
    async fn save(&self, seen: &SeenSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut data = String::new();
        for name in seen {
            data.push_str(name);
            data.push('\n');
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Saved {} seen names to {}", seen.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(names: &[&str]) -> SeenSet {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSeenStore::new(temp_dir.path().join("seen_deaths.txt"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_trims_and_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seen_deaths.txt");
        std::fs::write(&path, "  Alice Example \n\n\tBob Example\n   \n").unwrap();

        let store = FileSeenStore::new(&path);
        assert_eq!(store.load().await.unwrap(), set(&["Alice Example", "Bob Example"]));
    }

    #[tokio::test]
    async fn test_save_twice_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSeenStore::new(temp_dir.path().join("seen_deaths.txt"));
        let seen = set(&["Zoe Example", "Alice Example", "Jean-Luc Ébert"]);

        store.save(&seen).await.unwrap();
        store.save(&seen).await.unwrap();

        assert_eq!(store.load().await.unwrap(), seen);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_instead_of_appending() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSeenStore::new(temp_dir.path().join("nested/seen_deaths.txt"));

        store.save(&set(&["Alice Example", "Bob Example"])).await.unwrap();
        store.save(&set(&["Carol Example"])).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "Carol Example\n");
    }
}
