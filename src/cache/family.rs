use std::collections::BTreeMap;

use super::Cache;
use crate::models::VehicleFamily;
use crate::repository::Repository;
use crate::summary::Summary;

impl<R: Repository<VehicleFamily>> Cache<VehicleFamily, R> {
    /// Families that hold a launcher with this name, loose or inside a collection.
    pub fn families_containing(&self, launcher_name: &str) -> Vec<&VehicleFamily> {
        self.iter()
            .filter(|family| family.contains_launcher(launcher_name))
            .collect()
    }

    /// A freshly computed summary for every cached family, keyed by family name.
    pub fn summaries(&self) -> BTreeMap<String, Summary> {
        self.iter()
            .map(|family| (family.name.clone(), family.summary()))
            .collect()
    }
}
