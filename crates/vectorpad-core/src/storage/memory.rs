//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::project::ProjectFile;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    projects: RwLock<HashMap<String, ProjectFile>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, project: &ProjectFile) -> StorageResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        projects.insert(id.to_string(), project.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<ProjectFile> {
        let projects = self.projects.read().map_err(lock_error)?;
        projects
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        projects.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let projects = self.projects.read().map_err(lock_error)?;
        let mut ids: Vec<String> = projects.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasDocument;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn project() -> ProjectFile {
        let mut doc = CanvasDocument::new(800.0, 600.0);
        doc.add_shape(Rectangle::new(Point::new(1.0, 2.0), 3.0, 4.0).into());
        ProjectFile::from_document(&doc)
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let project = project();

        storage.save("test", &project).unwrap();
        let loaded = storage.load("test").unwrap();

        assert_eq!(loaded, project);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.load("nonexistent");

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();

        assert!(!storage.exists("test").unwrap());
        storage.save("test", &project()).unwrap();
        assert!(storage.exists("test").unwrap());

        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
        storage.delete("test").unwrap();
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        storage.save("doc2", &project()).unwrap();
        storage.save("doc1", &project()).unwrap();

        assert_eq!(storage.list().unwrap(), vec!["doc1".to_string(), "doc2".to_string()]);
    }
}
