//! In-memory caches in front of the file repositories.
//!
//! A [`Cache`] is a de-duplicated set of entities with case-insensitive name
//! lookup. It is filled from its repository with [`Cache::populate`] and only
//! changes when told to: nothing is invalidated automatically, so callers
//! refresh after writing.
//!
//! Repository failures never propagate out of a cache. They are handed to the
//! [`Reporter`] and the operation degrades to "nothing added".

mod family;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{Entity, Launcher, LauncherCollection, Payload, VehicleFamily};
use crate::report::{Buttons, Reporter, Severity};
use crate::repository::{FileRepository, Repository, RepositoryError};

pub type LauncherCache = Cache<Launcher>;
pub type LauncherCollectionCache = Cache<LauncherCollection>;
pub type VehicleFamilyCache = Cache<VehicleFamily>;
pub type PayloadCache = Cache<Payload>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("{count} cached entries are named '{name}'")]
    Ambiguous { name: String, count: usize },
}

pub struct Cache<T, R = FileRepository<T>> {
    repository: R,
    reporter: Arc<dyn Reporter>,
    entries: Vec<T>,
}

impl<T: Entity, R: Repository<T>> Cache<T, R> {
    pub fn new(repository: R, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            repository,
            reporter,
            entries: Vec::new(),
        }
    }

    /// Load every persisted entity. Returns how many were added.
    ///
    /// Entries that fail to load are reported and skipped.
    pub fn populate(&mut self) -> usize {
        if !self.entries.is_empty() {
            self.clear();
        }

        let names = match self.repository.list_names() {
            Ok(names) => names,
            Err(e) => {
                self.report(&e, "list");
                return 0;
            }
        };

        let mut added = 0;
        for name in &names {
            if self.load(name) {
                added += 1;
            }
        }

        tracing::debug!("Populated {} cache with {} entries", T::KIND.as_str(), added);
        added
    }

    /// Insert unless an entity with the same key is already cached.
    pub fn add(&mut self, entity: T) -> bool {
        if self.contains(&entity) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    /// Load a persisted entity and insert it. The name matches ignoring case.
    pub fn add_by_name(&mut self, name: &str) -> bool {
        let name = self.stored_name(name);
        self.load(&name)
    }

    /// Insert each entity in turn. Returns how many were new.
    pub fn add_range(&mut self, entities: impl IntoIterator<Item = T>) -> usize {
        let mut added = 0;
        for entity in entities {
            if self.add(entity) {
                added += 1;
            }
        }
        added
    }

    pub fn remove(&mut self, entity: &T) -> bool {
        let key = entity.key();
        let before = self.entries.len();
        self.entries.retain(|e| e.key() != key);
        self.entries.len() != before
    }

    /// Drop every cached entity with this name.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.has_name(name));
        self.entries.len() != before
    }

    /// Drop everything and reload from storage.
    pub fn refresh(&mut self) -> usize {
        self.clear();
        self.populate()
    }

    /// Replace the cached copy of `entity` with the persisted one.
    ///
    /// Unsaved changes to the cached copy are lost. If the entity is no
    /// longer in storage it stays out of the cache.
    pub fn refresh_entity(&mut self, entity: &T) -> bool {
        self.remove(entity);
        self.refresh_by_name(entity.name())
    }

    /// Replace every cached entity with this name by the persisted copy.
    pub fn refresh_by_name(&mut self, name: &str) -> bool {
        let name = self.stored_name(name);
        self.remove_by_name(&name);
        self.load(&name)
    }

    /// Persist `entity`, creating or overwriting it, then cache the stored copy.
    pub fn save(&mut self, entity: &T) -> bool {
        let stored = match self.repository.update(entity) {
            Err(RepositoryError::NotFound { .. }) => self.repository.create(entity),
            other => other,
        };

        if let Err(e) = stored {
            self.report(&e, "save");
            return false;
        }

        self.refresh_by_name(entity.name())
    }

    /// Remove from storage and from the cache.
    pub fn delete(&mut self, name: &str) -> bool {
        let name = self.stored_name(name);
        match self.repository.delete(&name) {
            Ok(existed) => {
                self.remove_by_name(&name);
                existed
            }
            Err(e) => {
                self.report(&e, "delete");
                false
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn retrieve(&self, name: &str) -> Result<Option<&T>, CacheError> {
        let mut matches = self.entries.iter().filter(|e| e.has_name(name));
        let Some(first) = matches.next() else {
            return Ok(None);
        };

        let extra = matches.count();
        if extra > 0 {
            return Err(CacheError::Ambiguous {
                name: name.to_string(),
                count: extra + 1,
            });
        }

        Ok(Some(first))
    }

    pub fn contains(&self, entity: &T) -> bool {
        let key = entity.key();
        self.entries.iter().any(|e| e.key() == key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot of the current contents.
    pub fn cached_objects(&self) -> Vec<T> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load(&mut self, name: &str) -> bool {
        match self.repository.retrieve(name) {
            Ok(Some(entity)) => self.add(entity),
            Ok(None) => {
                let message = format!("{} '{}' is not in storage", T::KIND.as_str(), name);
                tracing::warn!("{}", message);
                self.reporter
                    .show(&message, "Not found", Buttons::Ok, Severity::Warning);
                false
            }
            Err(e) => {
                self.report(&e, "load");
                false
            }
        }
    }

    /// The spelling `name` is stored under, preferring an exact match.
    ///
    /// Falls back to `name` itself when storage has no match or cannot be
    /// listed; the following repository call reports that.
    fn stored_name(&self, name: &str) -> String {
        let Ok(names) = self.repository.list_names() else {
            return name.to_string();
        };
        if names.iter().any(|n| n == name) {
            return name.to_string();
        }

        let wanted = name.to_lowercase();
        names
            .into_iter()
            .find(|n| n.to_lowercase() == wanted)
            .unwrap_or_else(|| name.to_string())
    }

    fn report(&self, error: &RepositoryError, action: &str) {
        let message = format!("Could not {} {}: {}", action, T::KIND.as_str(), error);
        tracing::warn!("{}", message);
        self.reporter
            .show(&message, error.caption(), Buttons::Ok, Severity::Error);
    }
}
