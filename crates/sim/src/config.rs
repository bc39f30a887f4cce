use std::path::Path;

use glam::Vec2;
use gridfile_common::Rect;
use gridfile_index::{GridConfig, GridError};
use serde::{Deserialize, Serialize};

/// Errors from configuring or building a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Simulation parameters. Every field has a default, so a YAML file only
/// needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid: GridConfig,
    /// Healthy agents scattered at start (candidates inside obstacles are dropped).
    pub initial_agents: usize,
    pub seed: u64,
    /// Velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f32,
    /// Half side of the square searched around each infected agent.
    pub infection_radius: f32,
    /// Chance per step that an infected agent infects a healthy neighbour.
    pub infection_probability: f64,
    /// Half side of an agent's collision square.
    pub agent_half_size: f32,
    /// Infected agents spawned by one outbreak.
    pub outbreak_size: usize,
    /// Outbreak agents land within this distance of the centre on each axis.
    pub outbreak_spread: f32,
    /// Steps between census samples.
    pub history_interval: u64,
    /// Census samples kept before the oldest is dropped.
    pub history_len: usize,
    pub obstacles: Vec<Rect>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            initial_agents: 50,
            seed: 42,
            max_speed: 2.0,
            infection_radius: 30.0,
            infection_probability: 0.05,
            agent_half_size: 3.0,
            outbreak_size: 30,
            outbreak_spread: 20.0,
            history_interval: 10,
            history_len: 200,
            obstacles: vec![
                Rect::from_xywh(300.0, 200.0, 20.0, 200.0),
                Rect::from_xywh(100.0, 400.0, 200.0, 20.0),
                Rect::from_xywh(500.0, 100.0, 200.0, 20.0),
            ],
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, SimError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// The simulated area as a rectangle anchored at the origin.
    pub fn domain(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.grid.width, self.grid.height))
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.grid.validate()?;
        if !(0.0..=1.0).contains(&self.infection_probability) {
            return Err(SimError::InvalidConfig(format!(
                "infection_probability must be in [0, 1], got {}",
                self.infection_probability
            )));
        }
        if self.infection_radius.is_nan() || self.infection_radius <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "infection_radius must be positive, got {}",
                self.infection_radius
            )));
        }
        let non_negative = |v: f32| v >= 0.0;
        if !non_negative(self.max_speed) || !non_negative(self.outbreak_spread) {
            return Err(SimError::InvalidConfig(
                "max_speed and outbreak_spread must be non-negative".into(),
            ));
        }
        if self.history_interval == 0 || self.history_len == 0 {
            return Err(SimError::InvalidConfig(
                "history_interval and history_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
