//! Translator settings.
//!
//! The defaults reproduce the wire format expected by existing raymarching
//! shaders: two-decimal payloads and ±1000 accumulator seeds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::translator::NodeKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Decimal places kept in emitted geometry payloads.
    pub precision: u32,
    /// Seed for min-style accumulators (union, smooth union, and the
    /// implicit outer accumulator above the root). Stands in for +∞.
    pub union_seed: f64,
    /// Seed for max-style accumulators (intersection). Stands in for −∞.
    pub intersection_seed: f64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            union_seed: 1000.0,
            intersection_seed: -1000.0,
        }
    }
}

impl TranslatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Neutral accumulator value for a node of `kind`. Primitives and
    /// modifiers do not accumulate and get 0.
    pub fn seed_for(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Union | NodeKind::SmoothUnion => self.union_seed,
            NodeKind::Intersection => self.intersection_seed,
            NodeKind::Sphere
            | NodeKind::Box
            | NodeKind::Torus
            | NodeKind::Cylinder
            | NodeKind::Lattice
            | NodeKind::Shell => 0.0,
        }
    }
}
