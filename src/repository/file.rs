use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Repository, RepositoryError, Result};
use crate::models::Entity;

const FILE_EXTENSION: &str = "json";

/// Stores each entity as `{base}/{name}/{name}.json`.
pub struct FileRepository<T> {
    base: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> FileRepository<T> {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            _entity: PhantomData,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn directory_for(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    pub fn file_for(&self, name: &str) -> PathBuf {
        self.directory_for(name)
            .join(format!("{}.{}", name, FILE_EXTENSION))
    }
}

impl<T> Clone for FileRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.base.clone())
    }
}

impl<T: Entity + Serialize + DeserializeOwned> FileRepository<T> {
    fn write(&self, entity: &T) -> Result<()> {
        let path = self.file_for(entity.name());
        let content = serde_json::to_string_pretty(entity).map_err(|source| {
            RepositoryError::Serialization {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, content).map_err(|e| RepositoryError::from_io(&path, e))
    }
}

impl<T: Entity + Serialize + DeserializeOwned> Repository<T> for FileRepository<T> {
    fn list_names(&self) -> Result<Vec<String>> {
        if metadata(&self.base)?.is_none() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.base).map_err(|e| RepositoryError::from_io(&self.base, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RepositoryError::from_io(&self.base, e))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| RepositoryError::from_io(entry.path(), e))?
                .is_dir();
            if !is_dir {
                continue;
            }
            // Directory names that are not valid UTF-8 cannot have been written by us
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn create(&self, entity: &T) -> Result<()> {
        let name = validate_name(entity.name())?;
        let dir = self.directory_for(name);
        if metadata(&dir)?.is_some() {
            return Err(RepositoryError::already_exists(T::KIND, name));
        }

        fs::create_dir_all(&dir).map_err(|e| RepositoryError::from_io(&dir, e))?;
        self.write(entity)?;

        tracing::debug!("Created {} '{}'", T::KIND.as_str(), name);
        Ok(())
    }

    fn retrieve(&self, name: &str) -> Result<Option<T>> {
        let name = validate_name(name)?;
        let path = self.file_for(name);
        match metadata(&path)? {
            Some(meta) if meta.is_file() => {}
            _ => return Ok(None),
        }

        let content =
            fs::read_to_string(&path).map_err(|e| RepositoryError::from_io(&path, e))?;
        let entity = serde_json::from_str(&content)
            .map_err(|source| RepositoryError::Serialization { path, source })?;

        Ok(Some(entity))
    }

    fn update(&self, entity: &T) -> Result<()> {
        let name = validate_name(entity.name())?;
        match metadata(&self.directory_for(name))? {
            Some(meta) if meta.is_dir() => {}
            _ => return Err(RepositoryError::not_found(T::KIND, name)),
        }

        self.write(entity)?;

        tracing::debug!("Updated {} '{}'", T::KIND.as_str(), name);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let name = validate_name(name)?;
        let dir = self.directory_for(name);
        if metadata(&dir)?.is_none() {
            return Ok(false);
        }

        fs::remove_dir_all(&dir).map_err(|e| RepositoryError::from_io(&dir, e))?;

        tracing::debug!("Deleted {} '{}'", T::KIND.as_str(), name);
        Ok(true)
    }
}

/// `None` only when the path does not exist; any other failure is an error.
fn metadata(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(e) => Err(RepositoryError::from_io(path, e)),
    }
}

/// Names double as directory and file names.
fn validate_name(name: &str) -> Result<&str> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        Err(RepositoryError::InvalidName(name.to_string()))
    } else {
        Ok(name)
    }
}
