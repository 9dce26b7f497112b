//! Domain models for the launch catalog.
//!
//! # Core Concepts
//!
//! ## Catalog Entities
//!
//! Each of these is persisted on its own and can be cached by name:
//!
//! - [`Launcher`]: A single named launch vehicle configuration with price,
//!   fairings and orbital capabilities.
//! - [`LauncherCollection`]: A versioned grouping of launchers sharing one
//!   vehicle lineage.
//! - [`VehicleFamily`]: The top-level aggregate of collections and loose launchers.
//! - [`Payload`]: Something a launcher is meant to carry.
//!
//! ## Ownership
//!
//! A launcher added to a collection or family carries the parent's
//! `global_identifier` in its `root_identifier`. Removing it clears the tag
//! back to the nil UUID.
//!
//! ## Derived Data
//!
//! [`Summary`](crate::summary::Summary) values are computed from the current
//! launcher lists whenever they are asked for. They are never stored.

use std::hash::Hash;

mod collection;
mod family;
mod launcher;
mod payload;

pub use collection::*;
pub use family::*;
pub use launcher::*;
pub use payload::*;

/// Which kind of entity a value is. Drives the storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Launcher,
    LauncherCollection,
    VehicleFamily,
    Payload,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        Self::Launcher,
        Self::LauncherCollection,
        Self::VehicleFamily,
        Self::Payload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Launcher => "launcher",
            Self::LauncherCollection => "launcher_collection",
            Self::VehicleFamily => "vehicle_family",
            Self::Payload => "payload",
        }
    }
}

/// Bit pattern of a float for use in an [`Entity::Key`].
///
/// `-0.0` and `0.0` give the same bits, as does every NaN.
pub(crate) fn float_key(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        (value + 0.0).to_bits()
    }
}

/// A named, persistable catalog entity.
///
/// Equality inside caches is defined by [`Entity::key`] rather than by
/// `PartialEq`, so every entity states exactly which fields make two values
/// "the same" for de-duplication.
pub trait Entity: Clone {
    /// Structural identity used for cache de-duplication.
    type Key: Eq + Hash;

    const KIND: EntityKind;

    fn name(&self) -> &str;

    fn key(&self) -> Self::Key;

    /// Case-insensitive name comparison used for lookups.
    fn has_name(&self, name: &str) -> bool {
        self.name().to_lowercase() == name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_key_matches_equal_floats() {
        assert_eq!(float_key(0.0), float_key(-0.0));
        assert_eq!(float_key(f64::NAN), float_key(-f64::NAN));
        assert_eq!(float_key(225000.0), float_key(225000.0));
        assert_ne!(float_key(221000.0), float_key(225000.0));
    }
}
