use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Entity, EntityKind, Launcher, LauncherCollection};
use crate::summary::Summary;

/// The top-level aggregate: collections of launchers plus loose launchers.
///
/// Summaries at this level cover both the loose launchers and every launcher
/// nested inside the family's collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFamily {
    pub global_identifier: Uuid,
    pub name: String,
    #[serde(default)]
    pub collections: Vec<LauncherCollection>,
    /// Launchers that belong to the family directly, outside any collection.
    #[serde(default)]
    pub launchers: Vec<Launcher>,
    pub notes: Option<String>,
    pub preview_file: Option<PathBuf>,
    pub updated_at: DateTime<Utc>,
}

impl VehicleFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            global_identifier: Uuid::new_v4(),
            name: name.into(),
            collections: Vec::new(),
            launchers: Vec::new(),
            notes: None,
            preview_file: None,
            updated_at: Utc::now(),
        }
    }

    pub fn add_collection(&mut self, collection: LauncherCollection) {
        self.collections.push(collection);
        self.updated_at = Utc::now();
    }

    pub fn remove_collection(&mut self, name: &str) -> Option<LauncherCollection> {
        let index = self.collections.iter().position(|c| c.has_name(name))?;
        self.updated_at = Utc::now();
        Some(self.collections.remove(index))
    }

    /// Add a loose launcher, tagging it with this family's identifier.
    pub fn add_launcher(&mut self, mut launcher: Launcher) {
        launcher.root_identifier = self.global_identifier;
        self.launchers.push(launcher);
        self.updated_at = Utc::now();
    }

    /// Detach a loose launcher. The returned launcher is unowned.
    pub fn remove_launcher(&mut self, name: &str) -> Option<Launcher> {
        let index = self.launchers.iter().position(|l| l.has_name(name))?;
        let mut launcher = self.launchers.remove(index);
        launcher.root_identifier = Uuid::nil();
        self.updated_at = Utc::now();
        Some(launcher)
    }

    pub fn collection(&self, name: &str) -> Option<&LauncherCollection> {
        self.collections.iter().find(|c| c.has_name(name))
    }

    /// Loose launchers first, then each collection's launchers.
    pub fn all_launchers(&self) -> impl Iterator<Item = &Launcher> {
        self.launchers
            .iter()
            .chain(self.collections.iter().flat_map(|c| c.launchers.iter()))
    }

    pub fn contains_launcher(&self, name: &str) -> bool {
        self.all_launchers().any(|l| l.has_name(name))
    }

    pub fn summary(&self) -> Summary {
        Summary::of(self.all_launchers())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyKey {
    global_identifier: Uuid,
    name: String,
}

impl Entity for VehicleFamily {
    type Key = FamilyKey;

    const KIND: EntityKind = EntityKind::VehicleFamily;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> FamilyKey {
        FamilyKey {
            global_identifier: self.global_identifier,
            name: self.name.to_lowercase(),
        }
    }
}
