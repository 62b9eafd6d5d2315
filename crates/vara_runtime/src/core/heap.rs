//! Garbage collection and heap management.

use super::view::{Storage, ViewInstance};
use crate::builtins_registry::BuiltinFn;
use crate::core::value::Value;
use vara_core::gc::ObjectId;

pub enum ManagedObject {
    List(Vec<Value>),
    View(Box<ViewInstance>),
    Function(BuiltinFn),
}

impl ManagedObject {
    pub fn size(&self) -> usize {
        // Base size of the enum variant + deep size estimation
        let base = std::mem::size_of::<ManagedObject>();
        let deep = match self {
            ManagedObject::List(v) => {
                // Count actual len + capacity overhead + allocator overhead
                v.len() * std::mem::size_of::<Value>()
                    + v.capacity() * std::mem::size_of::<Value>() / 4
                    + v.capacity() * 8 // Estimated allocator overhead
            }
            ManagedObject::View(view) => {
                let instance = std::mem::size_of::<ViewInstance>();
                match &view.storage {
                    // The raw allocation is owned by this view
                    Storage::Owned(data) => instance + data.byte_length(),
                    // Aliases add no storage of their own
                    Storage::Alias { .. } => instance,
                }
            }
            ManagedObject::Function(_) => 0,
        };
        base + deep
    }
}

pub struct Heap {
    pub(crate) objects: Vec<Option<ManagedObject>>,
    free_list: Vec<usize>,
    marks: Vec<u64>,
    pub(crate) alloc_count: usize,
    pub(crate) gc_threshold: usize,
    pub(crate) alloc_bytes: usize,
    pub(crate) gc_threshold_bytes: usize,
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(1024),
            free_list: Vec::new(),
            marks: Vec::new(),
            alloc_count: 0,
            gc_threshold: 100000, // Lower threshold for better memory management with large datasets
            alloc_bytes: 0,
            // Lower threshold to trigger GC more frequently with large datasets
            gc_threshold_bytes: 32 * 1024 * 1024, // 32MB start instead of 128MB
        }
    }

    /// Allocate a managed object on the heap. Never collects; callers
    /// schedule collection at their own safe points.
    pub fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        self.alloc_count += 1;
        self.alloc_bytes += obj.size();

        if let Some(id) = self.free_list.pop() {
            self.objects[id] = Some(obj);
            ObjectId(id)
        } else {
            let id = self.objects.len();
            self.objects.push(Some(obj));
            ObjectId(id)
        }
    }

    #[inline]
    pub fn should_gc(&self) -> bool {
        self.alloc_count >= self.gc_threshold || self.alloc_bytes >= self.gc_threshold_bytes
    }

    pub fn get(&self, id: ObjectId) -> &ManagedObject {
        self.objects[id.0]
            .as_ref()
            .expect("Object was garbage collected")
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut ManagedObject {
        self.objects[id.0]
            .as_mut()
            .expect("Object was garbage collected")
    }

    /// True when `id` refers to a slot that still holds an object.
    pub fn contains(&self, id: ObjectId) -> bool {
        id.0 < self.objects.len() && self.objects[id.0].is_some()
    }

    pub fn is_marked(&self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        self.marks.get(word).is_some_and(|w| (w & (1 << bit)) != 0)
    }

    fn set_mark(&mut self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        if word >= self.marks.len() {
            self.marks.resize(word + 1, 0);
        }
        let w = &mut self.marks[word];
        let mask = 1 << bit;
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        true
    }

    /// Mark all objects reachable from `roots`.
    pub(crate) fn mark_all(&mut self, roots: &[Value]) {
        // Clear marks at the beginning to avoid duplicate marking
        self.marks.clear();

        let mut pending_values: Vec<Value> = roots.to_vec();

        while let Some(val) = pending_values.pop() {
            if !val.is_obj() {
                continue;
            }
            let id = val.as_obj_id();
            if id.0 >= self.objects.len() || self.objects[id.0].is_none() {
                continue;
            }
            if !self.set_mark(id) {
                continue;
            }
            if let Some(obj) = &self.objects[id.0] {
                match obj {
                    ManagedObject::List(items) => {
                        for item in items {
                            pending_values.push(*item);
                        }
                    }
                    ManagedObject::View(view) => {
                        // An alias keeps its owning buffer reachable.
                        if let Storage::Alias { parent, .. } = &view.storage {
                            pending_values.push(*parent);
                        }
                    }
                    ManagedObject::Function(_) => {}
                }
            }
        }
    }

    /// Sweep unreachable objects and update thresholds. Returns how many
    /// objects were reclaimed.
    pub fn sweep(&mut self) -> usize {
        let mut live_bytes = 0;
        let mut live_count = 0;
        let mut reclaimed = 0;

        // Clear free_list before sweeping to rebuild it completely
        self.free_list.clear();

        for i in 0..self.objects.len() {
            if self.objects[i].is_none() {
                self.free_list.push(i);
                continue;
            }
            if self.is_marked(ObjectId(i)) {
                if let Some(obj) = &self.objects[i] {
                    live_bytes += obj.size();
                    live_count += 1;
                }
                continue;
            }
            // Take the object out so view finalizers run before the slot
            // is handed back to the free list.
            if let Some(mut obj) = self.objects[i].take() {
                if let ManagedObject::View(view) = &mut obj {
                    view.finalize();
                }
                reclaimed += 1;
            }
            self.free_list.push(i);
        }

        // Truncate trailing empty slots to reduce memory usage
        while self.objects.last().is_some_and(|o| o.is_none()) {
            self.objects.pop();
        }
        // Remove truncated indices from free_list
        let new_len = self.objects.len();
        self.free_list.retain(|&i| i < new_len);
        // Shrink capacity if significantly oversized
        if self.objects.capacity() > self.objects.len() * 4 && self.objects.capacity() > 4096 {
            self.objects.shrink_to(self.objects.len() * 2);
        }

        self.marks.clear();

        self.alloc_count = 0;
        self.alloc_bytes = live_bytes;

        // Adaptive strategy:
        // If heap is small, grow fast (2x).
        // If heap is large, grow slower (1.5x) to avoid massive pauses.
        let growth_factor = if live_bytes > 10 * 1024 * 1024 {
            1.5
        } else {
            2.0
        };

        self.gc_threshold = (live_count as f64 * growth_factor) as usize;
        self.gc_threshold = self.gc_threshold.max(32768);

        self.gc_threshold_bytes = (live_bytes as f64 * growth_factor) as usize;
        self.gc_threshold_bytes = self.gc_threshold_bytes.max(1024 * 1024); // Min 1MB

        reclaimed
    }

    /// Get memory statistics by object type
    pub fn memory_stats(&self) -> String {
        let mut list_count = 0usize;
        let mut list_bytes = 0usize;
        let mut view_count = 0usize;
        let mut view_bytes = 0usize;
        let mut view_owned = 0usize;
        let mut view_aliases = 0usize;
        let mut func_count = 0usize;
        let mut func_bytes = 0usize;

        for obj in self.objects.iter().flatten() {
            let size = obj.size();
            match obj {
                ManagedObject::List(_) => {
                    list_count += 1;
                    list_bytes += size;
                }
                ManagedObject::View(view) => {
                    view_count += 1;
                    view_bytes += size;
                    match view.storage {
                        Storage::Owned(_) => view_owned += 1,
                        Storage::Alias { .. } => view_aliases += 1,
                    }
                }
                ManagedObject::Function(_) => {
                    func_count += 1;
                    func_bytes += size;
                }
            }
        }

        let total_count = list_count + view_count + func_count;
        let total_bytes = list_bytes + view_bytes + func_bytes;
        let heap_overhead = self.objects.capacity() * std::mem::size_of::<Option<ManagedObject>>();

        format!(
            "=== Heap Memory Stats ===\n\
             List:     {:>8} objects, {:>12} bytes ({:.1}%)\n\
             View:     {:>8} objects, {:>12} bytes ({:.1}%) [owned={}, aliases={}]\n\
             Function: {:>8} objects, {:>12} bytes ({:.1}%)\n\
             --------------------------\n\
             Total:    {:>8} objects, {:>12} bytes\n\
             Heap vec: {:>8} slots,   {:>12} bytes overhead\n\
             Free:     {:>8} slots",
            list_count,
            list_bytes,
            if total_bytes > 0 {
                list_bytes as f64 / total_bytes as f64 * 100.0
            } else {
                0.0
            },
            view_count,
            view_bytes,
            if total_bytes > 0 {
                view_bytes as f64 / total_bytes as f64 * 100.0
            } else {
                0.0
            },
            view_owned,
            view_aliases,
            func_count,
            func_bytes,
            if total_bytes > 0 {
                func_bytes as f64 / total_bytes as f64 * 100.0
            } else {
                0.0
            },
            total_count,
            total_bytes,
            self.objects.capacity(),
            heap_overhead,
            self.free_list.len()
        )
    }
}
