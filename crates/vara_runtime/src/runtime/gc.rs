//! Garbage collection operations for the Runtime.
//!
//! This module contains:
//! - gc: Full garbage collection
//! - maybe_gc_with_roots: Conditional GC with extra roots

use crate::Runtime;
use crate::core::Value;

fn trace_gc_enabled() -> bool {
    std::env::var("VARA_TRACE_GC")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false)
}

impl Runtime {
    /// Collect all GC roots from the runtime state
    fn collect_gc_roots(&self, extra_roots: &[Value]) -> Vec<Value> {
        let estimated_roots = extra_roots.len() + self.gc_temp_roots.len() + self.env.len();

        let mut roots: Vec<Value> = Vec::with_capacity(estimated_roots);
        roots.extend_from_slice(extra_roots);
        roots.extend_from_slice(&self.gc_temp_roots);
        roots.extend(self.env.values());
        roots
    }

    /// Perform a full garbage collection cycle.
    pub fn gc(&mut self, extra_roots: &[Value]) {
        let roots = self.collect_gc_roots(extra_roots);
        self.heap.mark_all(&roots);
        let reclaimed = self.heap.sweep();
        if trace_gc_enabled() {
            eprintln!("gc: reclaimed {} objects", reclaimed);
        }
    }

    /// Perform garbage collection if the heap has grown enough.
    pub(crate) fn maybe_gc_with_roots(&mut self, roots: &[Value]) {
        if self.config.auto_gc && self.heap.should_gc() {
            self.gc(roots);
        }
    }
}
