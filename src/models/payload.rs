use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{float_key, Entity, EntityKind, Fairing, Launcher};

/// Something a launcher is meant to carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub name: String,
    /// Mass in tonnes.
    pub mass: f64,
    /// Stowed length in metres.
    pub length: f64,
    /// Stowed diameter in metres.
    pub diameter: f64,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Payload {
    pub fn new(name: impl Into<String>, mass: f64, length: f64, diameter: f64) -> Self {
        Self {
            name: name.into(),
            mass,
            length,
            diameter,
            notes: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether the payload physically fits inside a fairing.
    pub fn fits_in(&self, fairing: &Fairing) -> bool {
        self.length <= fairing.length && self.diameter <= fairing.diameter
    }

    /// Fits one of the launcher's fairings and is within some capability's mass limit.
    pub fn carried_by(&self, launcher: &Launcher) -> bool {
        launcher.fairings.iter().any(|f| self.fits_in(f))
            && launcher
                .capabilities
                .iter()
                .any(|c| c.payload.heaviest >= self.mass)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayloadKey {
    name: String,
    mass_bits: u64,
}

impl Entity for Payload {
    type Key = PayloadKey;

    const KIND: EntityKind = EntityKind::Payload;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> PayloadKey {
        PayloadKey {
            name: self.name.to_lowercase(),
            mass_bits: float_key(self.mass),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrbitType;

    #[test]
    fn test_carried_by_needs_room_and_lift() {
        let sat = Payload::new("Relay Sat", 4.0, 6.0, 3.0);

        let roomy = Launcher::new("Roomy", 1.0)
            .with_fairing(8.0, 3.5)
            .with_capability(OrbitType::Gto, 1.0, 5.0);
        let narrow = Launcher::new("Narrow", 1.0)
            .with_fairing(8.0, 2.5)
            .with_capability(OrbitType::Gto, 1.0, 5.0);
        let weak = Launcher::new("Weak", 1.0)
            .with_fairing(8.0, 3.5)
            .with_capability(OrbitType::Leo, 0.5, 3.0);

        assert!(sat.carried_by(&roomy));
        assert!(!sat.carried_by(&narrow));
        assert!(!sat.carried_by(&weak));
    }
}
