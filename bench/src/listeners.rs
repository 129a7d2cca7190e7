//! Listener types shared by the benchmarks.
//!
//! Reactions are kept cheap so the measurements are dominated by the relay itself.

use rusty_relay::{Event, Listener};

/// Counts notifications and emits nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counter {
    pub count: usize,
}

impl Listener for Counter {
    fn react(&mut self, _event: &Event) -> Vec<Event> {
        self.count += 1;
        Vec::new()
    }
}

/// Passes every event on unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Forward;

impl Listener for Forward {
    fn react(&mut self, event: &Event) -> Vec<Event> {
        vec![event.clone()]
    }
}

/// Treats the kind as a time-to-live: answers kind `n > 0` with `fan` events of kind `n - 1`.
#[derive(Debug, Clone, Copy)]
pub struct Decay {
    pub fan: usize,
}

impl Default for Decay {
    fn default() -> Self {
        Self { fan: 1 }
    }
}

impl Listener for Decay {
    fn react(&mut self, event: &Event) -> Vec<Event> {
        if event.kind() <= 0 {
            return Vec::new();
        }
        vec![Event::new(event.kind() - 1); self.fan]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_counts() {
        let mut counter = Counter::default();

        counter.react(&Event::new(1));
        counter.react(&Event::new(2));

        assert_eq!(counter.count, 2);
    }

    #[test]
    fn forward_echoes() {
        let event = Event::with_payload(3, 1.5_f32);

        assert_eq!(Forward.react(&event), vec![event]);
    }

    #[test]
    fn decay_stops_at_zero() {
        let mut decay = Decay { fan: 2 };

        assert_eq!(decay.react(&Event::new(2)), vec![Event::new(1), Event::new(1)]);
        assert!(decay.react(&Event::new(0)).is_empty());
    }
}
