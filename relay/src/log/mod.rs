//! Log capture.
//!
//! The relay reports through the [`log`](::log) facade: `debug!` when a broadcast starts and
//! quiesces, `trace!` per notification, and `warn!` for stale listeners and for follow-ups
//! dropped by the depth budget. [`ChannelLogger`] collects those records into a channel so an
//! application, or a test, can drain them.

mod channel;

pub use channel::{ChannelLogger, LogMessage};
