//! Neighbor-group driver for separation steering.
//!
//! Loads a scenario (settings, a focal position and its neighbors), calls the
//! per-neighbor contribution once for each neighbor and sums the results.
//! Coincident neighbors are filtered here, before the core sees them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use steer_core::{separation_contribution, NeighborContribution, SeparationConfig, Vector3D};
use steer_shared::{Position, SeparationSettings};

/// A focal entity and the neighbors found around it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: SeparationSettings,
    pub focal: Position,
    #[serde(default)]
    pub neighbors: Vec<Position>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid scenario JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// One neighbor's share of the steering
#[derive(Debug, Clone, Serialize)]
pub struct NeighborReport {
    pub index: usize,
    pub neighbor: Position,
    pub contribution: Position,
}

/// Result of running the driver over one scenario
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub reports: Vec<NeighborReport>,
    /// Indices of neighbors dropped for sitting on the focal position.
    pub skipped: Vec<usize>,
    pub total: Position,
}

fn validate_comfort_distance(comfort_distance: f32) -> Result<()> {
    if !comfort_distance.is_finite() || comfort_distance < 0.0 {
        anyhow::bail!(
            "Comfort distance must be a finite, non-negative number (got {})",
            comfort_distance
        );
    }
    Ok(())
}

fn validate_multiplier(multiplier: f32) -> Result<()> {
    if !multiplier.is_finite() {
        anyhow::bail!("Inside-comfort multiplier must be finite (got {})", multiplier);
    }
    Ok(())
}

/// Drives a per-neighbor contribution over a list of neighbors.
pub struct NeighborGroup {
    config: SeparationConfig,
    contribution: NeighborContribution,
}

impl NeighborGroup {
    pub fn new(settings: &SeparationSettings) -> Result<Self> {
        validate_comfort_distance(settings.comfort_distance)?;
        validate_multiplier(settings.multiplier_inside_comfort_distance)?;

        Ok(Self {
            config: settings.to_config(),
            contribution: separation_contribution,
        })
    }

    /// Swap the per-neighbor hook, e.g. to combine separation with a custom law.
    pub fn with_contribution(mut self, contribution: NeighborContribution) -> Self {
        self.contribution = contribution;
        self
    }

    pub fn config(&self) -> &SeparationConfig {
        &self.config
    }

    pub fn set_comfort_distance(&mut self, comfort_distance: f32) -> Result<()> {
        validate_comfort_distance(comfort_distance)?;
        self.config.set_comfort_distance(comfort_distance);
        log::debug!(
            "Comfort distance set to {} (squared {})",
            comfort_distance,
            self.config.comfort_distance_squared()
        );
        Ok(())
    }

    pub fn set_multiplier(&mut self, multiplier: f32) -> Result<()> {
        validate_multiplier(multiplier)?;
        self.config.set_multiplier_inside_comfort_distance(multiplier);
        log::debug!("Inside-comfort multiplier set to {}", multiplier);
        Ok(())
    }

    pub fn evaluate(&self, focal: Position, neighbors: &[Position]) -> Evaluation {
        let focal_vec = Vector3D::from(focal);
        let mut reports = Vec::with_capacity(neighbors.len());
        let mut skipped = Vec::new();
        let mut total = Vector3D::zero();

        for (index, &neighbor) in neighbors.iter().enumerate() {
            let neighbor_vec = Vector3D::from(neighbor);
            if neighbor_vec == focal_vec {
                log::warn!(
                    "Skipping neighbor {} at {:?}: coincident with focal position",
                    index,
                    neighbor
                );
                skipped.push(index);
                continue;
            }

            let contribution = (self.contribution)(focal_vec, neighbor_vec, &self.config);
            log::debug!(
                "Neighbor {} at distance {:.3}: {:?}",
                index,
                focal.distance_to(&neighbor),
                contribution
            );

            total += contribution;
            reports.push(NeighborReport {
                index,
                neighbor,
                contribution: contribution.into(),
            });
        }

        Evaluation {
            reports,
            skipped,
            total: total.into(),
        }
    }
}

/// Evaluate a scenario with its own settings.
pub fn run_scenario(scenario: &Scenario) -> Result<Evaluation> {
    let group = NeighborGroup::new(&scenario.settings).context("Invalid separation settings")?;
    Ok(group.evaluate(scenario.focal, &scenario.neighbors))
}
