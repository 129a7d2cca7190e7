//! Mesh benchmark scenario.
//!
//! A random listener graph. Every node decays the kind of the event it sees and answers with
//! `fan` follow-ups until the kind reaches zero, so the initial kind bounds the depth. The graph
//! may contain self-listeners and loops; the decaying kind is what makes every broadcast
//! quiesce.
//!
//! This scenario tests:
//! - Mixed fan-out and depth in one broadcast
//! - Duplicate registrations and cycles
//! - The cost of the depth budget when it cuts propagation short

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_relay::{Config, Event, Kind, Network, NodeId, Order, Propagation, Traversal};

use crate::listeners::Decay;
use crate::scenarios::Scenario;

/// Configuration for the mesh benchmark.
pub struct MeshConfig {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Listeners registered per node, chosen at random (repeats allowed).
    pub listeners_per_node: usize,
    /// Follow-ups each reaction emits while the kind is above zero.
    pub fan: usize,
    /// Kind of the initial event, which is also the depth at which reactions stop.
    pub ttl: Kind,
    /// Network configuration.
    pub relay: Config,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            node_count: 1_000,
            listeners_per_node: 3,
            fan: 1,
            ttl: 6,
            relay: Config::default(),
            seed: 12345,
        }
    }
}

/// Mesh benchmark scenario.
pub struct MeshScenario {
    config: MeshConfig,
    network: Network,
    nodes: Vec<NodeId>,
}

impl MeshScenario {
    pub fn new() -> Self {
        Self::with_config(MeshConfig::default())
    }

    pub fn with_config(config: MeshConfig) -> Self {
        Self {
            network: Network::with_config(config.relay),
            config,
            nodes: Vec::new(),
        }
    }

    /// Total number of listener registrations across the graph.
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|id| self.network.listeners(*id).ok())
            .map(<[NodeId]>::len)
            .sum()
    }
}

impl Default for MeshScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for MeshScenario {
    fn name(&self) -> &'static str {
        "mesh"
    }

    fn description(&self) -> &'static str {
        "Random listener graph with decaying follow-ups"
    }

    fn node_count(&self) -> usize {
        self.config.node_count
    }

    fn setup(&mut self) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let fan = self.config.fan;

        self.nodes = (0..self.config.node_count)
            .map(|_| self.network.insert(Decay { fan }))
            .collect();
        if self.nodes.is_empty() {
            return;
        }

        for node in &self.nodes {
            for _ in 0..self.config.listeners_per_node {
                let listener = self.nodes[rng.gen_range(0..self.nodes.len())];
                self.network
                    .add_listener(*node, listener)
                    .expect("mesh nodes are live");
            }
        }
    }

    fn update(&mut self) -> Propagation {
        self.nodes
            .first()
            .map(|source| {
                self.network
                    .broadcast(*source, Event::new(self.config.ttl))
                    .expect("mesh source is live")
            })
            .unwrap_or_default()
    }

    fn teardown(&mut self) {
        for id in self.nodes.drain(..) {
            self.network.remove(id);
        }
    }
}

/// The mesh configurations the scenario benchmarks compare.
pub fn variants() -> [(&'static str, Config); 4] {
    [
        ("nested", Config::default()),
        ("level", Config::default().with_traversal(Traversal::Level)),
        ("identity", Config::default().with_order(Order::Identity)),
        ("budget", Config::default().with_max_depth(3)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(relay: Config) -> MeshScenario {
        MeshScenario::with_config(MeshConfig {
            node_count: 50,
            listeners_per_node: 2,
            ttl: 4,
            relay,
            ..Default::default()
        })
    }

    #[test]
    fn mesh_scenario_setup() {
        let mut scenario = small(Config::default());

        scenario.setup();

        assert_eq!(scenario.node_count(), 50);
        assert_eq!(scenario.edge_count(), 100);

        scenario.teardown();
        assert_eq!(scenario.edge_count(), 0);
    }

    #[test]
    fn mesh_scenario_is_reproducible() {
        let mut first = small(Config::default());
        let mut second = small(Config::default());
        first.setup();
        second.setup();

        assert_eq!(first.update(), second.update());
    }

    #[test]
    fn mesh_scenario_quiesces_at_ttl() {
        let mut scenario = small(Config::default());
        scenario.setup();

        let report = scenario.update();

        // Reactions to kind 0 emit nothing, so no step runs deeper than the initial kind.
        assert!(report.deepest <= 4);
        assert!(report.is_complete());
        // 2 listeners per node, fan 1: each of the 5 levels doubles the notifications.
        assert_eq!(report.notifications, 2 + 4 + 8 + 16 + 32);
    }

    #[test]
    fn mesh_scenario_budget_truncates() {
        let mut scenario = small(Config::default().with_max_depth(1));
        scenario.setup();

        let report = scenario.update();

        assert_eq!(report.deepest, 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn traversal_does_not_change_totals() {
        let mut nested = small(Config::default());
        let mut level = small(Config::default().with_traversal(Traversal::Level));
        nested.setup();
        level.setup();

        let a = nested.update();
        let b = level.update();

        assert_eq!(a.notifications, b.notifications);
        assert_eq!(a.broadcasts, b.broadcasts);
    }
}
