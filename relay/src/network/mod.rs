//! The network owns every node and runs broadcasts between them.
//!
//! A [`Network`] is an arena of nodes addressed by [`NodeId`] handles. Each node has a
//! [`Listener`] (its reaction hook) and an ordered list of listener handles. The network owns
//! the nodes; a node never owns the nodes that listen to it.
//!
//! # Broadcasting
//!
//! [`Network::broadcast`] runs in steps. One step takes a broadcaster and an event and:
//!
//! 1. Snapshots the broadcaster's listener list.
//! 2. Calls [`Listener::react`] on every listener in the snapshot, in registration order,
//!    recording each listener's follow-up events. Every listener is notified before any
//!    follow-up is propagated.
//! 3. Schedules one step per follow-up event, with the *listener* that produced it as the new
//!    broadcaster.
//!
//! Steps are kept on an explicit pending queue rather than the call stack, so a long chain of
//! follow-ups grows the heap, not the stack. [`Traversal::Nested`] (the default) pushes new steps
//! to the front of the queue and reproduces the order of a recursive broadcaster exactly;
//! [`Traversal::Level`] pushes them to the back.
//!
//! The call returns once no steps remain (quiescence) and reports what happened as a
//! [`Propagation`].
//!
//! # Listener Lists
//!
//! A listener list only changes through [`add_listener()`](Network::add_listener) and
//! [`remove_listener()`](Network::remove_listener) on its own node. Broadcasting never edits
//! a listener list, and removing a node from the network does not edit the lists it appears
//! in: such entries become stale, and broadcasts skip them with a warning.
//!
//! # Cycles
//!
//! A node may listen to itself, and listener lists may form loops. Nothing stops a loop whose
//! reactions always emit follow-ups, unless a depth budget is configured with
//! [`Config::with_max_depth`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_relay::{Event, Network, Recorder};
//!
//! let mut network = Network::new();
//! let source = network.insert_relay();
//! let echo = network.insert(Recorder::new().respond(1, [Event::new(2)]));
//! let sink = network.insert(Recorder::new());
//!
//! network.add_listener(source, echo)?;
//! network.add_listener(echo, sink)?;
//!
//! let report = network.broadcast(source, Event::new(1))?;
//!
//! // The echo saw kind 1, and its follow-up was broadcast from the echo to the sink.
//! assert_eq!(network.get::<Recorder>(echo).unwrap().kinds(), vec![1]);
//! assert_eq!(network.get::<Recorder>(sink).unwrap().kinds(), vec![2]);
//! assert_eq!(report.broadcasts, 2);
//! ```

mod config;
mod report;

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace, warn};

use crate::{
    error::{Error, Result},
    event::Event,
    node::{Allocator, ErasedListener, Listener, NodeId, Relay},
};

pub use config::{Config, Order, Traversal};
pub use report::Propagation;

/// A node in the network: its reaction hook and the handles of its listeners.
struct Node {
    behavior: Box<dyn ErasedListener>,
    listeners: Vec<NodeId>,
}

/// A broadcast waiting to run.
struct Step {
    broadcaster: NodeId,
    event: Event,
    depth: usize,
}

/// The follow-ups one listener produced in a step.
type Reaction = (NodeId, Vec<Event>);

/// An arena of broadcast nodes.
///
/// A network is single-threaded: listeners are not required to be `Send`, and event payloads
/// are reference counted without atomics.
#[derive(Default)]
pub struct Network {
    config: Config,

    /// Handle allocator, tracking the live generation of every slot.
    allocator: Allocator,

    /// Node storage indexed by slot. `None` for freed slots.
    nodes: Vec<Option<Node>>,

    /// Number of live nodes.
    len: usize,
}

impl Network {
    /// Construct an empty network with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            allocator: Allocator::new(),
            nodes: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a node with the given reaction hook. The node starts with no listeners.
    pub fn insert<L: Listener>(&mut self, listener: L) -> NodeId {
        let id = self.allocator.alloc();
        let index = id.index();
        if index >= self.nodes.len() {
            self.nodes.resize_with(index + 1, || None);
        }
        self.nodes[index] = Some(Node {
            behavior: Box::new(listener),
            listeners: Vec::new(),
        });
        self.len += 1;
        id
    }

    /// Insert a node that reacts to nothing.
    pub fn insert_relay(&mut self) -> NodeId {
        self.insert(Relay)
    }

    /// Remove a node from the network. Returns `false` if the node was not live.
    ///
    /// Listener lists that contain the node are left as they are; their entries go stale and
    /// are skipped by later broadcasts.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            warn!("Attempted to remove a node that is not in the network: {}", id);
            return false;
        }
        self.nodes[id.index()] = None;
        self.allocator.free(id);
        self.len -= 1;
        true
    }

    /// Determine if the handle refers to a live node of this network.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.allocator.is_live(id)
    }

    /// Get the reaction hook of a node as a `T`.
    ///
    /// Returns `None` if the node is not live or its listener is not a `T`.
    pub fn get<T: Listener>(&self, id: NodeId) -> Option<&T> {
        self.node(id)?.behavior.as_any().downcast_ref::<T>()
    }

    /// Get the reaction hook of a node as a mutable `T`.
    ///
    /// Returns `None` if the node is not live or its listener is not a `T`.
    pub fn get_mut<T: Listener>(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id)?.behavior.as_any_mut().downcast_mut::<T>()
    }

    /// The listeners of a node, in registration order.
    pub fn listeners(&self, id: NodeId) -> Result<&[NodeId]> {
        self.node(id)
            .map(|node| node.listeners.as_slice())
            .ok_or(Error::UnknownNode(id))
    }

    /// Register `listener` with `node`.
    ///
    /// The listener is appended unconditionally: registering the same listener twice makes it
    /// react twice per broadcast, and a node may register itself.
    pub fn add_listener(&mut self, node: NodeId, listener: NodeId) -> Result<()> {
        self.node_mut(node)
            .ok_or(Error::UnknownNode(node))?
            .listeners
            .push(listener);
        Ok(())
    }

    /// Remove every registration of `listener` from `node`, returning how many were removed.
    /// Removing a listener that is not registered removes nothing.
    pub fn remove_listener(&mut self, node: NodeId, listener: NodeId) -> Result<usize> {
        let listeners = &mut self.node_mut(node).ok_or(Error::UnknownNode(node))?.listeners;
        let before = listeners.len();
        listeners.retain(|registered| *registered != listener);
        Ok(before - listeners.len())
    }

    /// Broadcast an event from `node` and propagate follow-ups until quiescence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `node` is not live. Nothing is notified in that case.
    pub fn broadcast(&mut self, node: NodeId, event: Event) -> Result<Propagation> {
        if !self.contains(node) {
            return Err(Error::UnknownNode(node));
        }
        debug!("Broadcasting kind {} from {}", event.kind(), node);

        let mut report = Propagation::default();
        let mut pending = VecDeque::new();
        pending.push_back(Step {
            broadcaster: node,
            event,
            depth: 0,
        });

        while let Some(step) = pending.pop_front() {
            let reactions = self.notify(&step, &mut report);
            self.schedule(step.depth + 1, reactions, &mut pending, &mut report);
        }

        debug!("Broadcast from {} quiesced: {}", node, report);
        Ok(report)
    }

    /// Run one step: notify every listener of the broadcaster and collect their follow-ups.
    fn notify(&mut self, step: &Step, report: &mut Propagation) -> Vec<Reaction> {
        report.broadcasts += 1;
        report.deepest = report.deepest.max(step.depth);

        // Steps are only scheduled for nodes that just reacted, so the broadcaster is live.
        let Some(broadcaster) = self.node(step.broadcaster) else {
            return Vec::new();
        };
        let listeners = broadcaster.listeners.clone();

        let mut reactions = Vec::with_capacity(listeners.len());
        for listener in listeners {
            let Some(node) = self.node_mut(listener) else {
                warn!(
                    "Skipping stale listener {} of {}",
                    listener, step.broadcaster
                );
                report.stale += 1;
                continue;
            };
            trace!(
                "{} -> {} ({}): kind {} at depth {}",
                step.broadcaster,
                listener,
                node.behavior.type_name(),
                step.event.kind(),
                step.depth
            );
            let follow_ups = node.behavior.react(&step.event);
            report.notifications += 1;
            reactions.push((listener, follow_ups));
        }

        match self.config.order {
            Order::Registration => reactions,
            Order::Identity => {
                let mut by_identity = BTreeMap::new();
                for (listener, follow_ups) in reactions {
                    by_identity.entry(listener).or_insert(follow_ups);
                }
                by_identity.into_iter().collect()
            }
        }
    }

    /// Queue a step per follow-up, each broadcast from the listener that produced it.
    fn schedule(
        &self,
        depth: usize,
        reactions: Vec<Reaction>,
        pending: &mut VecDeque<Step>,
        report: &mut Propagation,
    ) {
        let steps = reactions.into_iter().flat_map(|(listener, follow_ups)| {
            follow_ups.into_iter().map(move |event| Step {
                broadcaster: listener,
                event,
                depth,
            })
        });

        if !self.config.allows(depth) {
            let dropped = steps.count();
            if dropped > 0 {
                warn!(
                    "Dropping {} follow-up events beyond max depth {:?}",
                    dropped, self.config.max_depth
                );
                report.truncated += dropped;
            }
            return;
        }

        match self.config.traversal {
            Traversal::Level => pending.extend(steps),
            Traversal::Nested => {
                let steps: Vec<_> = steps.collect();
                for step in steps.into_iter().rev() {
                    pending.push_front(step);
                }
            }
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        if !self.contains(id) {
            return None;
        }
        self.nodes.get(id.index())?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.contains(id) {
            return None;
        }
        self.nodes.get_mut(id.index())?.as_mut()
    }
}
