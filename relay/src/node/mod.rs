//! Node handles and reaction hooks.
//!
//! Nodes live inside a [`Network`](crate::Network) and are referred to by [`NodeId`] handles.
//! A handle combines a slot [`Index`] with a [`Generation`]. The index identifies the slot in
//! the network, while the generation tracks how many times that slot has been reused, so a
//! handle to a removed node never aliases whatever node later takes its slot:
//!
//! ```rust,ignore
//! let first = allocator.alloc();   // NodeId { index: 0, generation: 0 }
//! allocator.free(first);
//! let reused = allocator.alloc();  // NodeId { index: 0, generation: 1 }
//! assert_ne!(first, reused);
//! ```
//!
//! The behavior of a node is supplied through the [`Listener`] trait.

mod listener;

use std::fmt;

use log::warn;

pub use listener::{FnListener, Listener, Recorder, Relay, from_fn};
pub(crate) use listener::ErasedListener;

/// How many times a node slot has been handed out. Starts at `FIRST` and is incremented every
/// time the slot is freed. A slot whose generation would overflow is retired instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The first generation of a slot.
    const FIRST: Self = Self(0);

    /// Get the next generation from the current, or `None` once the counter is exhausted.
    #[inline]
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

/// The slot a node occupies in its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(u32);

/// A handle to a node in a [`Network`](crate::Network).
///
/// Handles are ordered by index, then generation. Handles are only meaningful for the network
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    /// The slot of the node.
    index: Index,

    /// The generation of the slot when this handle was issued.
    generation: Generation,
}

impl NodeId {
    /// Construct a handle for the first generation of a slot.
    #[inline]
    pub(crate) fn new(index: u32) -> Self {
        Self::new_with_generation(Index(index), Generation::FIRST)
    }

    #[inline]
    pub(crate) const fn new_with_generation(index: Index, generation: Generation) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the slot index of this node for indexable storage (e.g. Vec).
    #[inline]
    pub fn index(&self) -> usize {
        self.index.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}v{}", self.index.0, self.generation.0)
    }
}

/// Allocates node handles and recycles freed slots.
///
/// When a handle is freed its slot generation is bumped before the slot goes back into the
/// dead pool, invalidating every outstanding handle for it. Slot indices are `u32`.
#[derive(Debug, Default)]
pub(crate) struct Allocator {
    /// Current generation of every slot ever handed out, indexed by slot. `None` marks a retired
    /// slot.
    generations: Vec<Option<Generation>>,

    /// Slots available for reuse.
    dead_pool: Vec<Index>,
}

impl Allocator {
    #[inline]
    pub const fn new() -> Self {
        Self {
            generations: Vec::new(),
            dead_pool: Vec::new(),
        }
    }

    /// Allocate a handle, reusing a freed slot when one is available.
    ///
    /// # Panics
    ///
    /// Panics once every `u32` slot index has been handed out.
    pub fn alloc(&mut self) -> NodeId {
        if let Some(index) = self.dead_pool.pop()
            && let Some(generation) = self.generations[index.0 as usize]
        {
            return NodeId::new_with_generation(index, generation);
        }

        let index = u32::try_from(self.generations.len()).expect("node slots exhausted");
        self.generations.push(Some(Generation::FIRST));
        NodeId::new(index)
    }

    /// Determine if the handle is the current generation of its slot.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.generations.get(id.index()) == Some(&Some(id.generation))
    }

    /// Free a handle for reuse. Returns `false` if the handle was already stale.
    pub fn free(&mut self, id: NodeId) -> bool {
        if !self.is_live(id) {
            warn!("Attempted to free a stale node handle: {}", id);
            return false;
        }
        let next = id.generation.next();
        self.generations[id.index()] = next;
        if next.is_some() {
            self.dead_pool.push(id.index);
        } else {
            warn!("Retiring {}: slot generations exhausted", id);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_uniqueness() {
        // Given
        let mut allocator = Allocator::new();

        // When
        let mut ids: Vec<_> = (0..200).map(|_| allocator.alloc()).collect();

        // Then - No dupes generated
        let pre_len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(pre_len, ids.len());
    }

    #[test]
    fn allocator_reuse() {
        // Given
        let mut allocator = Allocator::new();
        let ids: Vec<_> = (0..10).map(|_| allocator.alloc()).collect();

        // When
        for id in &ids {
            assert!(allocator.free(*id));
        }
        let mut reused: Vec<_> = (0..10).map(|_| allocator.alloc()).collect();

        // Then - Same slots, next generation
        reused.sort();
        for (old, new) in ids.iter().zip(reused.iter()) {
            assert_eq!(old.index(), new.index());
            assert_eq!(old.generation().next(), Some(new.generation()));
            assert_ne!(old, new);
        }
    }

    #[test]
    fn freed_handles_are_not_live() {
        let mut allocator = Allocator::new();
        let id = allocator.alloc();
        assert!(allocator.is_live(id));

        allocator.free(id);

        assert!(!allocator.is_live(id));
        let reused = allocator.alloc();
        assert!(allocator.is_live(reused));
        assert!(!allocator.is_live(id));
    }

    #[test]
    fn double_free_is_rejected() {
        let mut allocator = Allocator::new();
        let id = allocator.alloc();

        assert!(allocator.free(id));
        assert!(!allocator.free(id));

        // Only one slot went back into the pool.
        let a = allocator.alloc();
        let b = allocator.alloc();
        assert_ne!(a.index(), b.index());
    }

    #[test]
    fn exhausted_slot_is_retired() {
        // Given a slot on its last generation
        let mut allocator = Allocator::new();
        let first = allocator.alloc();
        let last = NodeId::new_with_generation(first.index, Generation(u32::MAX));
        allocator.generations[first.index()] = Some(last.generation);

        // When freeing it
        assert!(allocator.free(last));

        // Then no handle for the slot is live and it is never handed out again
        assert!(!allocator.is_live(last));
        assert!(!allocator.is_live(first));
        assert!(!allocator.free(last));
        let next = allocator.alloc();
        assert_ne!(next.index(), first.index());
        assert!(allocator.is_live(next));
    }

    #[test]
    fn generation_next_stops_at_max() {
        assert_eq!(Generation(0).next(), Some(Generation(1)));
        assert_eq!(Generation(u32::MAX).next(), None);
    }

    #[test]
    fn unknown_handles_are_not_live() {
        let allocator = Allocator::new();

        assert!(!allocator.is_live(NodeId::new(3)));
    }

    #[test]
    fn ordering_by_index_then_generation() {
        let a = NodeId::new(1);
        let b = NodeId::new_with_generation(Index(1), Generation(2));
        let c = NodeId::new(2);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn display() {
        let id = NodeId::new_with_generation(Index(4), Generation(1));

        assert_eq!(id.to_string(), "node#4v1");
    }
}
