use std::sync::Arc;

use parking_lot::Mutex;

use crate::probe::HitRecord;

/// Append-only store of hits, shared between probe tasks. Clones share the
/// same underlying list.
#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    hits: Arc<Mutex<Vec<HitRecord>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, hit: HitRecord) {
        self.hits.lock().push(hit);
    }

    /// Hits recorded so far, in arrival order.
    pub fn snapshot(&self) -> Vec<HitRecord> {
        self.hits.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.hits.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
