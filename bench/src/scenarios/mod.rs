//! Representative relay topologies.
//!
//! These scenarios exercise the relay with node counts and listener layouts that stress
//! different parts of a broadcast.
//!
//! # Scenarios
//!
//! - **Fan-out**: One broadcaster, many listeners, no follow-ups
//! - **Chain**: A long line of forwarding nodes, one follow-up per hop
//! - **Mesh**: Random listener graph with decaying follow-ups

pub mod chain;
pub mod fan_out;
pub mod mesh;

pub use chain::{ChainConfig, ChainScenario};
pub use fan_out::{FanOutConfig, FanOutScenario};
pub use mesh::{MeshConfig, MeshScenario};

use rusty_relay::Propagation;

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of nodes in this scenario.
    fn node_count(&self) -> usize;

    /// Set up the scenario (insert nodes, wire listeners).
    fn setup(&mut self);

    /// Run one broadcast to quiescence.
    fn update(&mut self) -> Propagation;

    /// Clean up the scenario.
    fn teardown(&mut self);
}
