//! Chain benchmark scenario.
//!
//! A line of forwarding nodes where every node listens to the one before it. A single event
//! hops the full length of the line, one follow-up broadcast per hop, so the depth of the
//! broadcast equals the chain length.

use rusty_relay::{Config, Event, Network, NodeId, Propagation, Traversal};

use crate::listeners::Forward;
use crate::scenarios::Scenario;

/// Configuration for the chain benchmark.
pub struct ChainConfig {
    /// Number of forwarding nodes after the head.
    pub length: usize,
    /// Pending-queue order.
    pub traversal: Traversal,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            length: 10_000,
            traversal: Traversal::Nested,
        }
    }
}

/// Chain benchmark scenario.
pub struct ChainScenario {
    config: ChainConfig,
    network: Network,
    nodes: Vec<NodeId>,
}

impl ChainScenario {
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            network: Network::with_config(Config::default().with_traversal(config.traversal)),
            config,
            nodes: Vec::new(),
        }
    }
}

impl Default for ChainScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ChainScenario {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn description(&self) -> &'static str {
        "A single event forwarded down a long line of nodes"
    }

    fn node_count(&self) -> usize {
        self.config.length + 1
    }

    fn setup(&mut self) {
        self.nodes.push(self.network.insert_relay());
        for _ in 0..self.config.length {
            let next = self.network.insert(Forward);
            if let Some(&previous) = self.nodes.last() {
                self.network
                    .add_listener(previous, next)
                    .expect("chain nodes are live");
            }
            self.nodes.push(next);
        }
    }

    fn update(&mut self) -> Propagation {
        self.nodes
            .first()
            .map(|head| {
                self.network
                    .broadcast(*head, Event::new(1))
                    .expect("chain head is live")
            })
            .unwrap_or_default()
    }

    fn teardown(&mut self) {
        for id in self.nodes.drain(..) {
            self.network.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_scenario_reaches_the_tail() {
        let mut scenario = ChainScenario::with_config(ChainConfig {
            length: 100,
            ..Default::default()
        });
        scenario.setup();

        let report = scenario.update();

        // Every forwarding node reacts once; the tail's follow-up finds no listeners.
        assert_eq!(report.notifications, 100);
        assert_eq!(report.broadcasts, 101);
        assert_eq!(report.deepest, 100);

        scenario.teardown();
    }

    #[test]
    fn chain_scenario_level_traversal_matches() {
        let mut scenario = ChainScenario::with_config(ChainConfig {
            length: 100,
            traversal: Traversal::Level,
        });
        scenario.setup();

        let report = scenario.update();

        assert_eq!(report.notifications, 100);
        assert_eq!(report.deepest, 100);
    }
}
