use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Entity, EntityKind, Launcher};
use crate::summary::Summary;

/// A versioned grouping of launchers that share one vehicle lineage.
///
/// Every launcher held here has its `root_identifier` set to this
/// collection's `global_identifier`. Use [`add_launcher`](Self::add_launcher)
/// and [`remove_launcher`](Self::remove_launcher) rather than touching
/// `launchers` directly to keep that tag in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherCollection {
    pub global_identifier: Uuid,
    pub name: String,
    /// Generation or version lineage label, e.g. "Block II".
    pub lineage: Option<String>,
    #[serde(default)]
    pub launchers: Vec<Launcher>,
    pub notes: Option<String>,
    pub preview_file: Option<PathBuf>,
    pub updated_at: DateTime<Utc>,
}

impl LauncherCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            global_identifier: Uuid::new_v4(),
            name: name.into(),
            lineage: None,
            launchers: Vec::new(),
            notes: None,
            preview_file: None,
            updated_at: Utc::now(),
        }
    }

    /// Take ownership of a launcher, tagging it with this collection's identifier.
    pub fn add_launcher(&mut self, mut launcher: Launcher) {
        launcher.root_identifier = self.global_identifier;
        self.launchers.push(launcher);
        self.updated_at = Utc::now();
    }

    pub fn add_launchers(&mut self, launchers: impl IntoIterator<Item = Launcher>) {
        for launcher in launchers {
            self.add_launcher(launcher);
        }
    }

    /// Detach the first launcher with the given name. The returned launcher is unowned.
    pub fn remove_launcher(&mut self, name: &str) -> Option<Launcher> {
        let index = self.launchers.iter().position(|l| l.has_name(name))?;
        let mut launcher = self.launchers.remove(index);
        launcher.root_identifier = Uuid::nil();
        self.updated_at = Utc::now();
        Some(launcher)
    }

    pub fn launcher(&self, name: &str) -> Option<&Launcher> {
        self.launchers.iter().find(|l| l.has_name(name))
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.launchers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    global_identifier: Uuid,
    name: String,
}

impl Entity for LauncherCollection {
    type Key = CollectionKey;

    const KIND: EntityKind = EntityKind::LauncherCollection;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> CollectionKey {
        CollectionKey {
            global_identifier: self.global_identifier,
            name: self.name.to_lowercase(),
        }
    }
}
