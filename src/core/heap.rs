/*!
# Indexed Binary Min-Heap

A binary min-heap whose entries are addressed by a stable [`Handle`] rather than by
position, so a caller holding a handle can lower that entry's priority in `O(log n)`
without a linear search. This is the heap Dijkstra, A*, and Prim build their open sets
on: a plain binary heap would force those algorithms into lazy deletion (re-insert on
every improvement, filter stale entries on pop); the indexed variant keeps the live set
bounded by the number of distinct payloads ever pushed with a given identity and removes
the need for a stale-entry check on the hot path, at the cost of a handle→index map kept
in sync on every swap.

Ported from a C++ `MinHeap<T, Compare>` that underlies this crate's Dijkstra/A*/MST
algorithms; the handle counter here is monotonic across `clear()` (the C++ original
resets it, which this crate's contract deliberately does not replicate — see the invariant
note on [`IndexedMinHeap::clear`]).
*/

use crate::core::error::{CoreError, Result};
use std::collections::HashMap;

/// Opaque, stable identifier for a heap entry, returned by [`IndexedMinHeap::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

struct HeapEntry<T> {
    payload: T,
    handle: Handle,
}

/// Binary min-heap over `T`, ordered by a caller-supplied strict-less comparator.
///
/// `T` need not implement `Ord` — callers of float-weighted payloads can pass a
/// `partial_cmp`-based comparator directly, matching how this crate's algorithms compare
/// `f32` distances.
pub struct IndexedMinHeap<T, C = fn(&T, &T) -> bool> {
    entries: Vec<HeapEntry<T>>,
    handle_to_index: HashMap<u64, usize>,
    next_handle: u64,
    less: C,
}

impl<T: PartialOrd> Default for IndexedMinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialOrd> IndexedMinHeap<T> {
    /// Creates an empty heap ordered by `T`'s natural `<`.
    pub fn new() -> Self {
        Self::with_comparator(|a, b| a < b)
    }
}

impl<T, C: Fn(&T, &T) -> bool> IndexedMinHeap<T, C> {
    /// Creates an empty heap ordered by `less(a, b)` meaning "a has strictly higher
    /// priority than b".
    pub fn with_comparator(less: C) -> Self {
        Self {
            entries: Vec::new(),
            handle_to_index: HashMap::new(),
            next_handle: 0,
            less,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `payload`, returning a fresh handle that stays valid until that entry is
    /// popped.
    pub fn push(&mut self, payload: T) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;

        let index = self.entries.len();
        self.entries.push(HeapEntry { payload, handle });
        self.handle_to_index.insert(handle.0, index);
        self.sift_up(index);
        handle
    }

    /// Reference to the minimum payload.
    pub fn top(&self) -> Result<&T> {
        self.entries
            .first()
            .map(|e| &e.payload)
            .ok_or(CoreError::EmptyHeap)
    }

    /// Removes and returns the minimum payload, invalidating its handle.
    pub fn pop(&mut self) -> Result<T> {
        if self.entries.is_empty() {
            return Err(CoreError::EmptyHeap);
        }
        let last = self.entries.len() - 1;
        self.swap_entries(0, last);
        let popped = self.entries.pop().expect("checked non-empty above");
        self.handle_to_index.remove(&popped.handle.0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(popped.payload)
    }

    /// True iff `handle` refers to a live entry.
    pub fn contains(&self, handle: Handle) -> bool {
        self.handle_to_index.contains_key(&handle.0)
    }

    /// Current payload addressed by `handle`.
    pub fn get(&self, handle: Handle) -> Result<&T> {
        let &index = self
            .handle_to_index
            .get(&handle.0)
            .ok_or(CoreError::UnknownHandle)?;
        Ok(&self.entries[index].payload)
    }

    /// Replaces the payload at `handle` with `payload`, provided it strictly dominates
    /// the current one under this heap's comparator; the handle is unchanged.
    pub fn decrease_key(&mut self, handle: Handle, payload: T) -> Result<()> {
        let &index = self
            .handle_to_index
            .get(&handle.0)
            .ok_or(CoreError::UnknownHandle)?;
        if !(self.less)(&payload, &self.entries[index].payload) {
            return Err(CoreError::NotSmaller);
        }
        self.entries[index].payload = payload;
        self.sift_up(index);
        Ok(())
    }

    /// Empties the heap. The handle counter is preserved: handles issued before and
    /// after a `clear()` never collide, since they are never reused by a fresh `push`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.handle_to_index.clear();
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        self.handle_to_index
            .insert(self.entries[i].handle.0, j);
        self.handle_to_index
            .insert(self.entries[j].handle.0, i);
        self.entries.swap(i, j);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !(self.less)(&self.entries[index].payload, &self.entries[parent].payload) {
                break;
            }
            self.swap_entries(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < self.entries.len()
                && (self.less)(&self.entries[left].payload, &self.entries[smallest].payload)
            {
                smallest = left;
            }
            if right < self.entries.len()
                && (self.less)(&self.entries[right].payload, &self.entries[smallest].payload)
            {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.swap_entries(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_is_ordered<T, C: Fn(&T, &T) -> bool>(heap: &IndexedMinHeap<T, C>) -> bool {
        for i in 1..heap.entries.len() {
            let parent = (i - 1) / 2;
            if (heap.less)(&heap.entries[i].payload, &heap.entries[parent].payload) {
                return false;
            }
        }
        true
    }

    #[test]
    fn test_push_pop_sorted() {
        let mut heap = IndexedMinHeap::new();
        for v in [5, 3, 8, 1, 9, 2] {
            heap.push(v);
            assert!(heap_is_ordered(&heap));
        }
        let mut popped = Vec::new();
        while !heap.is_empty() {
            popped.push(heap.pop().unwrap());
            assert!(heap_is_ordered(&heap));
        }
        assert_eq!(popped, vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn test_empty_errors() {
        let mut heap: IndexedMinHeap<i32> = IndexedMinHeap::new();
        assert_eq!(heap.top(), Err(CoreError::EmptyHeap));
        assert_eq!(heap.pop(), Err(CoreError::EmptyHeap));
    }

    #[test]
    fn test_decrease_key_scenario() {
        // Scenario 4 from the spec: push 10, 20, 30; decrease_key(h2, 5); top==5; pop==5; top==10.
        let mut heap = IndexedMinHeap::new();
        let h1 = heap.push(10);
        let h2 = heap.push(20);
        let _h3 = heap.push(30);
        let _ = h1;

        heap.decrease_key(h2, 5).unwrap();
        assert_eq!(*heap.top().unwrap(), 5);
        assert_eq!(heap.pop().unwrap(), 5);
        assert_eq!(*heap.top().unwrap(), 10);
    }

    #[test]
    fn test_decrease_key_not_smaller_fails() {
        let mut heap = IndexedMinHeap::new();
        let h = heap.push(5);
        assert_eq!(heap.decrease_key(h, 5), Err(CoreError::NotSmaller));
        assert_eq!(heap.decrease_key(h, 9), Err(CoreError::NotSmaller));
    }

    #[test]
    fn test_handle_invalidated_on_pop() {
        let mut heap = IndexedMinHeap::new();
        let h = heap.push(1);
        assert!(heap.contains(h));
        heap.pop().unwrap();
        assert!(!heap.contains(h));
        assert_eq!(heap.get(h), Err(CoreError::UnknownHandle));
        assert_eq!(heap.decrease_key(h, 0), Err(CoreError::UnknownHandle));
    }

    #[test]
    fn test_clear_preserves_handle_counter() {
        let mut heap = IndexedMinHeap::new();
        let h1 = heap.push(1);
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(h1));
        let h2 = heap.push(2);
        // The fresh push must not reuse h1's identity.
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_custom_comparator_max_heap() {
        let mut heap = IndexedMinHeap::with_comparator(|a: &i32, b: &i32| a > b);
        for v in [1, 5, 3] {
            heap.push(v);
        }
        assert_eq!(heap.pop().unwrap(), 5);
        assert_eq!(heap.pop().unwrap(), 3);
        assert_eq!(heap.pop().unwrap(), 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn heap_pop_yields_sorted_sequence(mut values in proptest::collection::vec(any::<i32>(), 0..200)) {
            let mut heap = IndexedMinHeap::new();
            for v in values.iter() {
                heap.push(*v);
            }
            values.sort();
            let mut popped = Vec::new();
            while !heap.is_empty() {
                popped.push(heap.pop().unwrap());
            }
            prop_assert_eq!(popped, values);
        }

        #[test]
        fn contains_transitions_exactly_once(values in proptest::collection::vec(any::<i32>(), 1..50)) {
            let mut heap = IndexedMinHeap::new();
            let handles: Vec<_> = values.into_iter().map(|v| heap.push(v)).collect();
            for h in &handles {
                prop_assert!(heap.contains(*h));
            }
            while !heap.is_empty() {
                heap.pop().unwrap();
            }
            for h in &handles {
                prop_assert!(!heap.contains(*h));
            }
        }
    }
}
