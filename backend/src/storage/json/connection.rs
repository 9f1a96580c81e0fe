use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the data directory created under the user's documents folder.
pub const DEFAULT_DATA_DIRECTORY_NAME: &str = "La Gestiona";

/// JsonConnection owns the data directory that collection files live in
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory
    /// (~/Documents/La Gestiona, or ./data when no documents folder exists)
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_data_directory())
    }

    pub fn default_data_directory() -> PathBuf {
        match dirs::document_dir() {
            Some(documents) => documents.join(DEFAULT_DATA_DIRECTORY_NAME),
            None => PathBuf::from("data"),
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file holding the collection stored under `key`
    pub fn collection_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = JsonConnection::new(&nested).expect("Failed to create connection");

        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(connection.collection_path("dossiers"), nested.join("dossiers.json"));
    }
}
