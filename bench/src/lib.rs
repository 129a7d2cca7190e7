//! Benchmark utilities for Rusty Relay.
//!
//! This crate provides benchmarking infrastructure for the relay network:
//!
//! - **Microbenchmarks**: Individual operations (insert, register, single broadcast)
//! - **Scenario benchmarks**: Representative topologies (fan-out, long chains, random meshes)
//! - **Memory tracking**: Heap allocation profiling via dhat
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_relay_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_relay_bench -- broadcast
//!
//! # Run with memory profiling (slower)
//! cargo bench -p rusty_relay_bench --features memory_profiling
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.
//! Memory profiling results are written to `dhat-heap.json` for viewing with
//! DHAT's viewer.

pub mod listeners;
pub mod memory;
pub mod scenarios;
