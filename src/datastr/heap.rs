//! A min-priority queue over node ids keyed by an integer priority, with
//! idempotent "push or update key" — the substitute for a true decrease-key
//! heap, since `std::collections::BinaryHeap` doesn't offer one. Stale
//! entries left behind by a key update are recognised and skipped on pop by
//! comparing against each node's `current_key`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub struct MinIdHeap {
    heap: BinaryHeap<Reverse<(u32, u32)>>,
    current_key: Vec<Option<u32>>,
}

impl MinIdHeap {
    pub fn new(n: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(n),
            current_key: vec![None; n],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current_key.iter().all(Option::is_none) && self.heap.is_empty()
    }

    pub fn push(&mut self, node: u32, key: u32) {
        self.current_key[node as usize] = Some(key);
        self.heap.push(Reverse((key, node)));
    }

    /// Push `node` with `key` if it isn't queued yet, otherwise update its key.
    pub fn push_or_set_key(&mut self, node: u32, key: u32) {
        self.push(node, key);
    }

    /// Pop the node with the smallest current key, skipping stale duplicates.
    pub fn pop(&mut self) -> Option<u32> {
        while let Some(Reverse((key, node))) = self.heap.pop() {
            if self.current_key[node as usize] == Some(key) {
                self.current_key[node as usize] = None;
                return Some(node);
            }
            // stale entry from an earlier push_or_set_key call; skip it
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_key_order() {
        let mut q = MinIdHeap::new(3);
        q.push(0, 5);
        q.push(1, 1);
        q.push(2, 3);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(0));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn key_update_uses_latest_value() {
        let mut q = MinIdHeap::new(2);
        q.push(0, 10);
        q.push_or_set_key(0, 1);
        q.push(1, 5);
        assert_eq!(q.pop(), Some(0));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), None);
    }
}
