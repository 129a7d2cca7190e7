//! The reaction hook and the stock listeners built on it.
//!
//! Every node in a network carries a [`Listener`]. When a node it listens to broadcasts, the
//! network calls [`Listener::react`] with the event. Whatever events `react` returns are then
//! broadcast *from the reacting node* to its own listeners.
//!
//! Three listeners ship with the crate:
//! - [`Relay`]: observes nothing and emits nothing. A node built from it only forwards events
//!   that other nodes hand to it through `broadcast`.
//! - [`FnListener`]: wraps a closure, created with [`from_fn`].
//! - [`Recorder`]: keeps every event it sees and answers scripted kinds with follow-ups.

use std::{any::Any, collections::HashMap};

use crate::event::{Event, Kind};

/// The reaction hook of a node.
///
/// The default implementation ignores the event and emits nothing.
///
/// # Cycles
///
/// A node may listen to itself, or sit on a loop of listeners. If every reaction around such a
/// loop keeps returning follow-ups, the broadcast never quiesces unless the network was built
/// with a depth budget (see [`Config::with_max_depth`](crate::Config::with_max_depth)). Cap the
/// follow-ups in the reaction itself when a loop is intended.
pub trait Listener: 'static {
    /// React to an event broadcast by a node this listener is registered with. Returned events
    /// are broadcast on behalf of this listener.
    fn react(&mut self, _event: &Event) -> Vec<Event> {
        Vec::new()
    }
}

/// A listener that reacts to nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Relay;

impl Listener for Relay {}

/// A listener backed by a closure.
pub struct FnListener<F>(F);

/// Create a listener from a closure taking the event and returning its follow-ups.
///
/// ```rust,ignore
/// let echo = network.insert(from_fn(|event| vec![Event::new(event.kind() + 1)]));
/// ```
pub fn from_fn<F>(react: F) -> FnListener<F>
where
    F: FnMut(&Event) -> Vec<Event> + 'static,
{
    FnListener(react)
}

impl<F> Listener for FnListener<F>
where
    F: FnMut(&Event) -> Vec<Event> + 'static,
{
    fn react(&mut self, event: &Event) -> Vec<Event> {
        (self.0)(event)
    }
}

/// A listener that records every event it sees.
///
/// A recorder can be scripted to answer a kind with a fixed list of follow-ups. Kinds without a
/// script produce no follow-ups.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    /// Every event seen, in arrival order.
    seen: Vec<Event>,

    /// Follow-ups to emit per kind.
    script: HashMap<Kind, Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every event of `kind` with the given follow-ups. Replaces any earlier script for
    /// the same kind.
    pub fn respond(mut self, kind: Kind, follow_ups: impl IntoIterator<Item = Event>) -> Self {
        self.script.insert(kind, follow_ups.into_iter().collect());
        self
    }

    /// The events seen so far, in arrival order.
    #[inline]
    pub fn seen(&self) -> &[Event] {
        &self.seen
    }

    /// The kinds of the events seen so far, in arrival order.
    pub fn kinds(&self) -> Vec<Kind> {
        self.seen.iter().map(Event::kind).collect()
    }

    /// Forget the events seen so far. The script is kept.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl Listener for Recorder {
    fn react(&mut self, event: &Event) -> Vec<Event> {
        self.seen.push(event.clone());
        self.script.get(&event.kind()).cloned().unwrap_or_default()
    }
}

/// Type-erased interface for listeners.
///
/// The network stores `Box<dyn ErasedListener>` and uses [`as_any()`](Self::as_any) and
/// [`as_any_mut()`](Self::as_any_mut) to downcast back to the concrete listener when typed
/// access is needed.
pub(crate) trait ErasedListener {
    /// Forward to [`Listener::react`].
    fn react(&mut self, event: &Event) -> Vec<Event>;

    /// The concrete listener type, for diagnostics.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<L: Listener> ErasedListener for L {
    fn react(&mut self, event: &Event) -> Vec<Event> {
        Listener::react(self, event)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<L>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
