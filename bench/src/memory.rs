//! Heap cost of a propagation, sampled with dhat.
//!
//! Sampling only records anything when the bench crate is built with
//! `--features memory_profiling`; otherwise every heap figure is zero and only the
//! [`Propagation`] report is meaningful. The profile is also written to `dhat-heap.json`,
//! which can be opened in dhat's viewer.

use std::fmt;

use rusty_relay::Propagation;

/// Heap totals observed while one broadcast propagated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapUsage {
    pub bytes: u64,
    pub blocks: u64,
    pub peak_bytes: u64,
}

/// A propagation report paired with the heap it cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationCost {
    pub report: Propagation,
    pub heap: HeapUsage,
}

impl PropagationCost {
    /// Bytes allocated for each reaction hook call.
    pub fn bytes_per_notification(&self) -> f64 {
        ratio(self.heap.bytes, self.report.notifications)
    }

    /// Bytes allocated for each broadcast step, the caller's included.
    pub fn bytes_per_broadcast(&self) -> f64 {
        ratio(self.heap.bytes, self.report.broadcasts)
    }

    /// Allocations made for each reaction hook call.
    pub fn blocks_per_notification(&self) -> f64 {
        ratio(self.heap.blocks, self.report.notifications)
    }
}

fn ratio(total: u64, per: usize) -> f64 {
    if per == 0 { 0.0 } else { total as f64 / per as f64 }
}

impl fmt::Display for PropagationCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; {:.1} B/notification, {:.1} B/broadcast, {:.2} allocs/notification, peak {} B",
            self.report,
            self.bytes_per_notification(),
            self.bytes_per_broadcast(),
            self.blocks_per_notification(),
            self.heap.peak_bytes
        )
    }
}

#[cfg(feature = "memory_profiling")]
fn sample_heap(propagate: impl FnOnce() -> Propagation) -> (Propagation, HeapUsage) {
    // dhat allows a single live profiler per process.
    let _profiler = dhat::Profiler::new_heap();
    let report = propagate();
    let stats = dhat::HeapStats::get();
    let heap = HeapUsage {
        bytes: stats.total_bytes,
        blocks: stats.total_blocks,
        peak_bytes: stats.max_bytes as u64,
    };
    (report, heap)
}

#[cfg(not(feature = "memory_profiling"))]
fn sample_heap(propagate: impl FnOnce() -> Propagation) -> (Propagation, HeapUsage) {
    (propagate(), HeapUsage::default())
}

/// Run one propagation and report what it cost on the heap.
pub fn measure_memory(propagate: impl FnOnce() -> Propagation) -> PropagationCost {
    let (report, heap) = sample_heap(propagate);
    PropagationCost { report, heap }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(bytes: u64, blocks: u64, broadcasts: usize, notifications: usize) -> PropagationCost {
        PropagationCost {
            report: Propagation {
                broadcasts,
                notifications,
                ..Default::default()
            },
            heap: HeapUsage {
                bytes,
                blocks,
                peak_bytes: 512,
            },
        }
    }

    #[test]
    fn costs_are_split_by_notification_and_broadcast() {
        let cost = cost(6400, 64, 4, 32);

        assert_eq!(cost.bytes_per_notification(), 200.0);
        assert_eq!(cost.bytes_per_broadcast(), 1600.0);
        assert_eq!(cost.blocks_per_notification(), 2.0);
    }

    #[test]
    fn quiet_propagation_costs_nothing_per_step() {
        let cost = cost(128, 1, 0, 0);

        assert_eq!(cost.bytes_per_notification(), 0.0);
        assert_eq!(cost.bytes_per_broadcast(), 0.0);
    }

    #[test]
    fn display_leads_with_the_report() {
        let cost = cost(6400, 64, 4, 32);

        assert_eq!(
            cost.to_string(),
            "4 broadcasts, 32 notifications, depth 0; 200.0 B/notification, \
             1600.0 B/broadcast, 2.00 allocs/notification, peak 512 B"
        );
    }

    #[cfg(not(feature = "memory_profiling"))]
    #[test]
    fn measure_memory_keeps_the_report() {
        use rusty_relay::{Event, Network};

        let mut network = Network::new();
        let source = network.insert_relay();
        let sink = network.insert_relay();
        network.add_listener(source, sink).unwrap();

        let cost = measure_memory(|| network.broadcast(source, Event::new(1)).unwrap());

        assert_eq!(cost.report.notifications, 1);
        assert_eq!(cost.heap, HeapUsage::default());
    }
}
