//! API token storage.
//!
//! The token is read from its source on every request, so replacing the
//! token file (or saving a new one from the settings panel) takes effect
//! on the next call without restarting.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;

/// Supplies the value sent in the `Authorization` header.
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` when nothing is stored.
    fn token(&self) -> Option<String>;
}

/// Token kept in a plain-text file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the token, creating parent directories as needed.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.trim())?;
        tracing::info!("API token saved to {:?}", self.path);
        Ok(())
    }

    pub fn token_present(&self) -> bool {
        self.token().is_some()
    }

    /// Remove the stored token. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read token file {:?}: {}", self.path, e);
                }
                None
            }
        }
    }
}

/// Fixed token, e.g. passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self((!token.trim().is_empty()).then(|| token.trim().to_string()))
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Platform data directory used for the token file and logs.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("", "", "hotel-admin")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default token file location.
pub fn default_token_path() -> PathBuf {
    data_dir().join("token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_token_is_reread_after_change() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        store.save("Bearer first\n").unwrap();
        assert_eq!(store.token().as_deref(), Some("Bearer first"));

        std::fs::write(store.path(), "Bearer second").unwrap();
        assert_eq!(store.token().as_deref(), Some("Bearer second"));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(FileTokenStore::new(path).token(), None);
    }

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").token().as_deref(), Some("abc"));
        assert_eq!(StaticToken::new("  ").token(), None);
        assert_eq!(StaticToken::none().token(), None);
    }
}
