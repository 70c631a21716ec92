//! Tracks variable identities already rendered within one write call.
//!
//! The set lives exactly as long as a single top-level write: it is created
//! empty, consulted when attributed variables are rendered with their
//! attributes, and discarded when the call returns.  It is not a cache.

use crate::VarId;
use indexmap::IndexSet;

/// Insertion-ordered set of already-emitted variable identities.
#[derive(Debug, Default)]
pub(crate) struct VisitedSet {
    seen: IndexSet<VarId>,
}

impl VisitedSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `id`; `true` when it was not yet present.
    pub(crate) fn mark(&mut self, id: VarId) -> bool {
        self.seen.insert(id)
    }

    /// Has `id` been recorded in this call?
    pub(crate) fn is_marked(&self, id: VarId) -> bool {
        self.seen.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_reports_first_sighting() {
        let mut set = VisitedSet::new();
        assert!(!set.is_marked(VarId(3)));
        assert!(set.mark(VarId(3)));
        assert!(set.is_marked(VarId(3)));
        assert!(!set.mark(VarId(3)));
        assert!(!set.is_marked(VarId(4)));
    }
}
