//! The catalog: every cache, wired to its storage location and one reporter.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{
    Cache, LauncherCache, LauncherCollectionCache, PayloadCache, VehicleFamilyCache,
};
use crate::config::Settings;
use crate::models::Entity;
use crate::report::Reporter;
use crate::repository::FileRepository;

pub struct Catalog {
    settings: Settings,
    launchers: LauncherCache,
    collections: LauncherCollectionCache,
    families: VehicleFamilyCache,
    payloads: PayloadCache,
}

impl Catalog {
    /// Build empty caches over the locations in `settings`. Nothing is read yet.
    pub fn open(settings: Settings, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            launchers: cache_for(&settings, &reporter),
            collections: cache_for(&settings, &reporter),
            families: cache_for(&settings, &reporter),
            payloads: cache_for(&settings, &reporter),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fill every cache from storage. Returns the total number of entities loaded.
    pub fn populate_all(&mut self) -> usize {
        let total = self.launchers.populate()
            + self.collections.populate()
            + self.families.populate()
            + self.payloads.populate();
        tracing::info!(
            "Loaded {} entities from {}",
            total,
            self.settings.current_directory.display()
        );
        total
    }

    pub fn refresh_all(&mut self) -> usize {
        self.launchers.clear();
        self.collections.clear();
        self.families.clear();
        self.payloads.clear();
        self.populate_all()
    }

    pub fn launchers(&self) -> &LauncherCache {
        &self.launchers
    }

    pub fn launchers_mut(&mut self) -> &mut LauncherCache {
        &mut self.launchers
    }

    pub fn collections(&self) -> &LauncherCollectionCache {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut LauncherCollectionCache {
        &mut self.collections
    }

    pub fn families(&self) -> &VehicleFamilyCache {
        &self.families
    }

    pub fn families_mut(&mut self) -> &mut VehicleFamilyCache {
        &mut self.families
    }

    pub fn payloads(&self) -> &PayloadCache {
        &self.payloads
    }

    pub fn payloads_mut(&mut self) -> &mut PayloadCache {
        &mut self.payloads
    }
}

fn cache_for<T>(settings: &Settings, reporter: &Arc<dyn Reporter>) -> Cache<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    let repository = FileRepository::new(settings.location_for(T::KIND));
    Cache::new(repository, Arc::clone(reporter))
}
