/// The order in which pending broadcasts are run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Depth-first. A follow-up broadcast, and everything it causes, completes before the next
    /// follow-up of the same step starts. This is the order a recursive broadcaster produces.
    #[default]
    Nested,

    /// Breadth-first. Follow-ups queue behind every broadcast already pending, so propagation
    /// proceeds one depth level at a time.
    Level,
}

/// The order in which the reactions of one broadcast step are turned into follow-up broadcasts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// One entry per registration, in registration order.
    #[default]
    Registration,

    /// Sorted by listener handle. A listener registered several times still reacts once per
    /// registration, but only the follow-ups of its first reaction are kept.
    Identity,
}

/// Configuration for a [`Network`](super::Network).
///
/// ```rust,ignore
/// let config = Config::default()
///     .with_traversal(Traversal::Level)
///     .with_max_depth(16);
/// let network = Network::with_config(config);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub traversal: Traversal,
    pub order: Order,

    /// The deepest follow-up broadcast allowed. The caller's broadcast is depth 0. `None` leaves
    /// propagation unbounded.
    pub max_depth: Option<usize>,
}

impl Config {
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Determine if a broadcast at `depth` is within the budget.
    #[inline]
    pub fn allows(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}
