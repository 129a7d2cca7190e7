use std::fmt;

/// What a single call to [`Network::broadcast`](super::Network::broadcast) did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    /// Broadcast steps run, including the caller's.
    pub broadcasts: usize,

    /// Reaction hook calls.
    pub notifications: usize,

    /// The deepest broadcast step run.
    pub deepest: usize,

    /// Follow-up events dropped because their broadcast would exceed the depth budget.
    pub truncated: usize,

    /// Listener entries skipped because the node they refer to was removed.
    pub stale: usize,
}

impl Propagation {
    /// Determine if propagation reached quiescence without the depth budget cutting it short.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.truncated == 0
    }
}

impl fmt::Display for Propagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} broadcasts, {} notifications, depth {}",
            self.broadcasts, self.notifications, self.deepest
        )?;
        if self.truncated > 0 {
            write!(f, ", {} truncated", self.truncated)?;
        }
        if self.stale > 0 {
            write!(f, ", {} stale", self.stale)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_zero_counters() {
        let report = Propagation {
            broadcasts: 2,
            notifications: 3,
            deepest: 1,
            ..Default::default()
        };

        assert_eq!(report.to_string(), "2 broadcasts, 3 notifications, depth 1");
        assert!(report.is_complete());
    }

    #[test]
    fn display_includes_truncated_and_stale() {
        let report = Propagation {
            broadcasts: 4,
            notifications: 4,
            deepest: 3,
            truncated: 1,
            stale: 2,
        };

        assert_eq!(
            report.to_string(),
            "4 broadcasts, 4 notifications, depth 3, 1 truncated, 2 stale"
        );
        assert!(!report.is_complete());
    }
}
