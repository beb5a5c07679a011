// File: crates/converge-core/src/config.rs
// Summary: Session configuration (sequence spec, animation, probe, surface) loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::geometry::{HEIGHT, WIDTH};
use crate::probe::ProbePolicy;

/// Parameters of the converging sequence. Created once per session.
///
/// Contract: `oscillation_range`, `convergence_speed` and `sequence_length`
/// are expected to be positive. The generator does not check them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSpec {
    pub target: f64,
    pub oscillation_range: f64,
    pub convergence_speed: f64,
    pub sequence_length: usize,
}

impl Default for SequenceSpec {
    fn default() -> Self {
        Self { target: 1.0, oscillation_range: 1.0, convergence_speed: 1.0, sequence_length: 50 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub total_duration_ms: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { enabled: true, total_duration_ms: 2000.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Initial probe value; `None` starts the probe unset.
    pub default_value: Option<f64>,
    pub policy: ProbePolicy,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { default_value: Some(1.5), policy: ProbePolicy::Accept }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    Dark,
    Light,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub sequence: SequenceSpec,
    pub animation: AnimationConfig,
    pub probe: ProbeConfig,
    /// Fixed RNG seed; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub width: i32,
    pub height: i32,
    pub theme: ThemeName,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            sequence: SequenceSpec::default(),
            animation: AnimationConfig::default(),
            probe: ProbeConfig::default(),
            seed: None,
            width: WIDTH,
            height: HEIGHT,
            theme: ThemeName::Dark,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(s: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Collect human-readable warnings for values that produce degenerate output.
    /// Nothing here is fatal: the generator and scheduler accept any input.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let s = &self.sequence;
        if s.sequence_length == 0 {
            warnings.push("sequence_length is 0; nothing will be plotted".to_string());
        }
        if s.convergence_speed <= 0.0 {
            warnings.push(format!("convergence_speed {} <= 0; the sequence will not converge", s.convergence_speed));
        }
        if s.oscillation_range <= 0.0 {
            warnings.push(format!("oscillation_range {} <= 0", s.oscillation_range));
        }
        if self.animation.total_duration_ms < 0.0 {
            warnings.push(format!("total_duration_ms {} is negative", self.animation.total_duration_ms));
        }
        if self.width <= 0 || self.height <= 0 {
            warnings.push(format!("surface {}x{} has no area", self.width, self.height));
        }
        for w in &warnings {
            tracing::warn!("{w}");
        }
        warnings
    }
}
