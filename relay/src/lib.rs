//! Synchronous, tree-shaped event relay.
//!
//! A [`Network`] owns a set of nodes. Each node carries a [`Listener`] (its reaction hook) and
//! an ordered list of listener handles. Broadcasting an [`Event`] from a node notifies every
//! registered listener first, then rebroadcasts each listener's follow-up events *from that
//! listener*, until no follow-ups remain.
//!
//! ```rust,ignore
//! use rusty_relay::{Event, Network, Recorder};
//!
//! let mut network = Network::new();
//! let sensor = network.insert_relay();
//! let display = network.insert(Recorder::new());
//!
//! network.add_listener(sensor, display)?;
//! network.broadcast(sensor, Event::new(1))?;
//!
//! assert_eq!(network.get::<Recorder>(display).unwrap().kinds(), vec![1]);
//! ```

pub mod error;
pub mod event;
pub mod log;
pub mod network;
pub mod node;

pub use error::{Error, Result};
pub use event::{Event, Kind, Payload};
pub use network::{Config, Network, Order, Propagation, Traversal};
pub use node::{FnListener, Listener, NodeId, Recorder, Relay, from_fn};
