//! Shared value types used by the index, the simulation and the CLI.

mod types;

pub use types::{AgentId, Health, Rect};
