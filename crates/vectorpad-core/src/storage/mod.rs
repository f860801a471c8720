//! Storage abstraction for saved projects.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::project::ProjectFile;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Project not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for project storage backends.
///
/// Projects are addressed by a free-form id; backends map it to whatever key
/// or file name they need.
pub trait Storage: Send + Sync {
    /// Save a project, replacing any existing one with the same id.
    fn save(&self, id: &str, project: &ProjectFile) -> StorageResult<()>;

    /// Load a project.
    fn load(&self, id: &str) -> StorageResult<ProjectFile>;

    /// Delete a project. Deleting a missing project is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all project ids.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a project exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}
