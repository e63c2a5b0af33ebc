//! Indexed min-heap used as the A* open list.
//!
//! Entries are keyed by `(f, seq)`: lower `f` pops first, and among equal `f`
//! the entry stamped earlier pops first (FIFO). A position map from node index
//! to heap slot gives O(1) membership tests and O(log n) decrease-key.

use std::cmp::Ordering;

const NONE: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    idx: usize,
    f: i32,
    /// Monotonically increasing stamp, refreshed on every key change.
    seq: u64,
}

impl Entry {
    #[inline]
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

/// Priority frontier over dense node indices.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: Vec<Entry>,
    slots: Vec<usize>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frontier able to hold indices `0..capacity` without growing
    /// its position map.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::new(),
            slots: vec![NONE; capacity],
            seq: 0,
        }
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `idx` is currently queued.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|&s| s != NONE)
    }

    /// The priority of `idx`, if queued.
    #[inline]
    pub fn priority(&self, idx: usize) -> Option<i32> {
        match self.slots.get(idx) {
            Some(&s) if s != NONE => Some(self.heap[s].f),
            _ => None,
        }
    }

    /// Remove every entry and restart the insertion sequence.
    pub fn clear(&mut self) {
        for e in &self.heap {
            self.slots[e.idx] = NONE;
        }
        self.heap.clear();
        self.seq = 0;
    }

    /// Queue `idx` with priority `f`. If `idx` is already queued its
    /// priority is replaced instead.
    pub fn push(&mut self, idx: usize, f: i32) {
        if self.contains(idx) {
            self.decrease_key(idx, f);
            return;
        }
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, NONE);
        }
        let seq = self.next_seq();
        let slot = self.heap.len();
        self.heap.push(Entry { idx, f, seq });
        self.slots[idx] = slot;
        self.sift_up(slot);
    }

    /// Change the priority of a queued `idx` to `f` and re-stamp its
    /// insertion order, as if it had been removed and pushed again.
    ///
    /// Returns `false` if `idx` is not queued.
    pub fn decrease_key(&mut self, idx: usize, f: i32) -> bool {
        let Some(&slot) = self.slots.get(idx) else {
            return false;
        };
        if slot == NONE {
            return false;
        }
        let seq = self.next_seq();
        self.heap[slot].f = f;
        self.heap[slot].seq = seq;
        // The new stamp is the largest so far, so an unchanged `f` can only
        // move the entry down.
        let slot = self.sift_up(slot);
        self.sift_down(slot);
        true
    }

    /// Remove and return the entry with the smallest `(f, seq)` key.
    pub fn pop(&mut self) -> Option<(usize, i32)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.slots[top.idx] = NONE;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top.idx, top.f))
    }

    /// The entry [`pop`](Self::pop) would return, without removing it.
    pub fn peek(&self) -> Option<(usize, i32)> {
        self.heap.first().map(|e| (e.idx, e.f))
    }

    #[inline]
    fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq += 1;
        s
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].idx] = a;
        self.slots[self.heap[b].idx] = b;
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].cmp_key(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && self.heap[right].cmp_key(&self.heap[left]) == Ordering::Less {
                child = right;
            }
            if self.heap[child].cmp_key(&self.heap[slot]) != Ordering::Less {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }
}
