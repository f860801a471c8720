//! File-based project storage.

use super::{Storage, StorageError, StorageResult};
use crate::project::ProjectFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores projects as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/vectorpad/projects/`
    /// On Windows: `%LOCALAPPDATA%\vectorpad\projects\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("vectorpad").join("projects"))
    }

    /// Get the file path for a project id.
    fn project_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write a project to an arbitrary path.
    pub fn save_to_path(path: &Path, project: &ProjectFile) -> StorageResult<()> {
        let json = project
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Read a project from an arbitrary path.
    pub fn load_from_path(path: &Path) -> StorageResult<ProjectFile> {
        let json = fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        ProjectFile::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, project: &ProjectFile) -> StorageResult<()> {
        Self::save_to_path(&self.project_path(id), project)
    }

    fn load(&self, id: &str) -> StorageResult<ProjectFile> {
        let path = self.project_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Self::load_from_path(&path)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.project_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut ids: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.project_path(id).exists())
    }
}
