//! Headless contagion simulation built on the grid file.
//!
//! Agents wander a bounded domain, bounce off walls and obstacles, and infect
//! healthy neighbours found through range queries on the index.
//!
//! # Invariants
//! - Every live agent is tracked by the grid at its current position.
//! - Given the same config (including seed) and the same calls, a run is
//!   reproducible step for step.

mod agent;
mod config;
mod history;
mod world;

pub use agent::Agent;
pub use config::{SimConfig, SimError};
pub use history::{Census, History};
pub use world::{World, WorldSummary};

pub fn crate_info() -> &'static str {
    "gridfile-sim v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_the_crate() {
        assert!(crate_info().starts_with("gridfile-sim"));
    }
}
