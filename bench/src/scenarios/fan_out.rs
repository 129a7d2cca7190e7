//! Fan-out benchmark scenario.
//!
//! One broadcaster with many listeners that only count what they see. This measures the
//! notify phase on its own: no follow-ups are ever scheduled.

use rusty_relay::{Event, Network, NodeId, Propagation};

use crate::listeners::Counter;
use crate::scenarios::Scenario;

/// Configuration for the fan-out benchmark.
pub struct FanOutConfig {
    /// Number of listeners registered with the broadcaster.
    pub listener_count: usize,
    /// How many times every listener is registered.
    pub registrations: usize,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            listener_count: 10_000,
            registrations: 1,
        }
    }
}

/// Fan-out benchmark scenario.
pub struct FanOutScenario {
    config: FanOutConfig,
    network: Network,
    source: Option<NodeId>,
    listeners: Vec<NodeId>,
}

impl FanOutScenario {
    pub fn new() -> Self {
        Self::with_config(FanOutConfig::default())
    }

    pub fn with_config(config: FanOutConfig) -> Self {
        Self {
            config,
            network: Network::new(),
            source: None,
            listeners: Vec::new(),
        }
    }

    /// Total notifications counted across all listeners so far.
    pub fn total_count(&self) -> usize {
        self.listeners
            .iter()
            .filter_map(|id| self.network.get::<Counter>(*id))
            .map(|counter| counter.count)
            .sum()
    }
}

impl Default for FanOutScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for FanOutScenario {
    fn name(&self) -> &'static str {
        "fan_out"
    }

    fn description(&self) -> &'static str {
        "One broadcaster notifying many counting listeners"
    }

    fn node_count(&self) -> usize {
        self.config.listener_count + 1
    }

    fn setup(&mut self) {
        let source = self.network.insert_relay();
        self.listeners = (0..self.config.listener_count)
            .map(|_| self.network.insert(Counter::default()))
            .collect();
        for _ in 0..self.config.registrations {
            for listener in &self.listeners {
                self.network
                    .add_listener(source, *listener)
                    .expect("source was just inserted");
            }
        }
        self.source = Some(source);
    }

    fn update(&mut self) -> Propagation {
        self.source
            .map(|source| {
                self.network
                    .broadcast(source, Event::new(1))
                    .expect("source is live")
            })
            .unwrap_or_default()
    }

    fn teardown(&mut self) {
        for id in self.listeners.drain(..).chain(self.source.take()) {
            self.network.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_scenario_update() {
        let mut scenario = FanOutScenario::with_config(FanOutConfig {
            listener_count: 50,
            registrations: 2,
        });
        scenario.setup();

        let report = scenario.update();

        assert_eq!(report.notifications, 100);
        assert_eq!(report.broadcasts, 1);
        assert_eq!(scenario.total_count(), 100);

        scenario.teardown();
        assert_eq!(scenario.total_count(), 0);
        assert_eq!(scenario.update(), Propagation::default());
    }

    #[test]
    #[should_panic(expected = "source is live")]
    fn fan_out_scenario_update_rejects_missing_source() {
        // Given a scenario whose source was removed behind its back
        let mut scenario = FanOutScenario::with_config(FanOutConfig {
            listener_count: 3,
            registrations: 1,
        });
        scenario.setup();
        let source = scenario.source.unwrap();
        scenario.network.remove(source);

        // When updating, the failed broadcast is not reported as an empty run
        scenario.update();
    }
}
