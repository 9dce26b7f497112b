use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{float_key, Entity, EntityKind};

/// A single named launch vehicle configuration.
///
/// Launchers are the leaves of the catalog. They can live on their own or be
/// owned by a [`LauncherCollection`](super::LauncherCollection) or a
/// [`VehicleFamily`](super::VehicleFamily); the owner is recorded in
/// `root_identifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    pub name: String,
    /// Identifier of the owning collection or family. Nil when unowned.
    #[serde(default)]
    pub root_identifier: Uuid,
    /// Price in game funds.
    pub price: f64,
    /// Screenshot of the assembled vehicle.
    pub preview_file: Option<PathBuf>,
    /// The game's craft file this entry describes.
    pub craft_file: Option<PathBuf>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fairings: Vec<Fairing>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub pacification_options: Vec<String>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Launcher {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            root_identifier: Uuid::nil(),
            price,
            preview_file: None,
            craft_file: None,
            tags: Vec::new(),
            fairings: Vec::new(),
            capabilities: Vec::new(),
            pacification_options: Vec::new(),
            notes: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_fairing(mut self, length: f64, diameter: f64) -> Self {
        self.fairings.push(Fairing { length, diameter });
        self
    }

    pub fn with_capability(mut self, orbit: OrbitType, lightest: f64, heaviest: f64) -> Self {
        self.capabilities.push(Capability {
            payload: PayloadRange { lightest, heaviest },
            trajectory: Trajectory::new(orbit),
        });
        self
    }

    pub fn is_owned(&self) -> bool {
        !self.root_identifier.is_nil()
    }
}

/// Identity is the owner, the name (case-insensitive), the price and the craft file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LauncherKey {
    root_identifier: Uuid,
    name: String,
    price_bits: u64,
    craft_file: Option<PathBuf>,
}

impl Entity for Launcher {
    type Key = LauncherKey;

    const KIND: EntityKind = EntityKind::Launcher;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> LauncherKey {
        LauncherKey {
            root_identifier: self.root_identifier,
            name: self.name.to_lowercase(),
            price_bits: float_key(self.price),
            craft_file: self.craft_file.clone(),
        }
    }
}

/// A payload enclosure option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fairing {
    /// Usable length in metres.
    pub length: f64,
    /// Usable diameter in metres.
    pub diameter: f64,
}

/// What a launcher can deliver, and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub payload: PayloadRange,
    pub trajectory: Trajectory,
}

/// Payload mass bounds in tonnes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub lightest: f64,
    pub heaviest: f64,
}

/// Target orbit for a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub orbit: OrbitType,
    pub altitude_km: Option<f64>,
    pub inclination_deg: Option<f64>,
}

impl Trajectory {
    pub fn new(orbit: OrbitType) -> Self {
        Self {
            orbit,
            altitude_km: None,
            inclination_deg: None,
        }
    }
}

/// The class of orbit a capability targets.
///
/// - `Leo`: Low orbit
/// - `Polar`: Near-polar low orbit
/// - `Sso`: Sun-synchronous
/// - `Gto`: Geostationary transfer
/// - `Geo`: Geostationary
/// - `Lunar`: Transfer to the nearest moon
/// - `Interplanetary`: Escape trajectory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrbitType {
    Leo,
    Polar,
    Sso,
    Gto,
    Geo,
    Lunar,
    Interplanetary,
}
