//! Roll-ups of price, fairing and capability statistics over launchers.
//!
//! Every fold here is order independent, so callers can pass launchers in
//! whatever order a cache or directory listing produced them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Launcher, OrbitType, PayloadRange};

/// Cheapest and most expensive launcher prices in scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub cheapest: f64,
    pub most_expensive: f64,
}

/// Largest fairing dimensions in scope.
///
/// A maximum that is zero or negative is reported as `None`, the same as when
/// no fairings are present at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FairingSummary {
    pub max_length: Option<f64>,
    pub max_diameter: Option<f64>,
}

/// A full roll-up for a collection or family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub number_of_versions: usize,
    pub price: Option<PriceSummary>,
    pub fairing: FairingSummary,
    /// Payload extremes per orbit type.
    pub capabilities: BTreeMap<OrbitType, PayloadRange>,
}

impl Summary {
    pub fn of<'a>(launchers: impl IntoIterator<Item = &'a Launcher>) -> Self {
        let launchers: Vec<&Launcher> = launchers.into_iter().collect();

        Self {
            number_of_versions: launchers.len(),
            price: price_summary(launchers.iter().copied()),
            fairing: fairing_summary(launchers.iter().copied()),
            capabilities: capability_summary(launchers.iter().copied()),
        }
    }
}

/// `None` when there are no launchers.
pub fn price_summary<'a>(launchers: impl IntoIterator<Item = &'a Launcher>) -> Option<PriceSummary> {
    launchers.into_iter().fold(None, |acc, launcher| {
        let price = launcher.price;
        Some(match acc {
            None => PriceSummary {
                cheapest: price,
                most_expensive: price,
            },
            Some(s) => PriceSummary {
                cheapest: s.cheapest.min(price),
                most_expensive: s.most_expensive.max(price),
            },
        })
    })
}

pub fn fairing_summary<'a>(launchers: impl IntoIterator<Item = &'a Launcher>) -> FairingSummary {
    let (max_length, max_diameter) = launchers
        .into_iter()
        .flat_map(|l| l.fairings.iter())
        .fold((0.0_f64, 0.0_f64), |(length, diameter), f| {
            (length.max(f.length), diameter.max(f.diameter))
        });

    FairingSummary {
        max_length: positive(max_length),
        max_diameter: positive(max_diameter),
    }
}

/// Group capabilities by orbit type, keeping the lightest and heaviest payload per group.
pub fn capability_summary<'a>(
    launchers: impl IntoIterator<Item = &'a Launcher>,
) -> BTreeMap<OrbitType, PayloadRange> {
    let mut by_orbit: BTreeMap<OrbitType, PayloadRange> = BTreeMap::new();

    for capability in launchers.into_iter().flat_map(|l| l.capabilities.iter()) {
        by_orbit
            .entry(capability.trajectory.orbit)
            .and_modify(|range| {
                range.lightest = range.lightest.min(capability.payload.lightest);
                range.heaviest = range.heaviest.max(capability.payload.heaviest);
            })
            .or_insert(capability.payload);
    }

    by_orbit
}

pub fn count_versions<'a>(launchers: impl IntoIterator<Item = &'a Launcher>) -> usize {
    launchers.into_iter().count()
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}
