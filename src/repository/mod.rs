mod file;

pub use file::FileRepository;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::EntityKind;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Storage errors.
///
/// A missing entity on read is not an error: [`Repository::retrieve`] returns
/// `Ok(None)` for it. `NotFound` is only produced by operations that require
/// the entity to exist already.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to (de)serialize {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }

    pub(crate) fn not_found(kind: EntityKind, name: &str) -> Self {
        Self::NotFound {
            kind: kind.as_str(),
            name: name.to_string(),
        }
    }

    pub(crate) fn already_exists(kind: EntityKind, name: &str) -> Self {
        Self::AlreadyExists {
            kind: kind.as_str(),
            name: name.to_string(),
        }
    }

    /// A short caption suitable for a dialog title.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Not found",
            Self::AlreadyExists { .. } => "Already exists",
            Self::InvalidName(_) => "Invalid name",
            Self::PermissionDenied(_) => "Access denied",
            Self::Io { .. } => "Storage error",
            Self::Serialization { .. } => "Corrupt entry",
        }
    }
}

/// Persistence for one entity type, keyed by entity name.
pub trait Repository<T> {
    /// Names of every stored entity. Order is unspecified.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Store a new entity. Never overwrites an existing one.
    fn create(&self, entity: &T) -> Result<()>;

    fn retrieve(&self, name: &str) -> Result<Option<T>>;

    /// Overwrite an entity that was previously created.
    fn update(&self, entity: &T) -> Result<()>;

    /// Returns `false` if there was nothing to delete.
    fn delete(&self, name: &str) -> Result<bool>;
}
