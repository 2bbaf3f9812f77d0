//! FIFO queue of resting orders at a single price, with an O(1) cancel index.
//!
//! Grounded directly in `examples/original_source/include/price_level.hpp`
//! and `src/price_level.cpp`: a `std::list<Order>` holding the FIFO queue and
//! an `unordered_map<order_id, list::iterator>` for O(1) erase-by-id. Safe
//! Rust has no stable list iterators, so the list is a slab (`Vec<Option<Node>>`
//! plus a free list) of nodes linked by slot index instead of by pointer —
//! the slot index plays exactly the role the C++ version gives the iterator.
//!
//! The whole structure sits behind one `Mutex` so a `PriceLevel` can be
//! shared the way the teacher crate shares every price level it creates
//! (`Arc<PriceLevel>` held in a concurrent skip list). Under the crate's
//! single-writer contract (`spec.md` §5) the lock is never contended.

use crate::orderbook::order::Order;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct Node {
    order: Order,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Default)]
struct Inner {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    index: std::collections::HashMap<u64, usize>,
    total_qty: u64,
}

impl Inner {
    fn alloc(&mut self, node: Node) -> usize {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    /// Unlinks the node at `idx` from the list, leaving its slot free for reuse.
    fn unlink(&mut self, idx: usize) {
        let node = self.slots[idx].take().expect("unlink of empty slot");
        match node.prev {
            Some(p) => self.slots[p].as_mut().unwrap().next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.slots[n].as_mut().unwrap().prev = node.prev,
            None => self.tail = node.prev,
        }
        self.free.push(idx);
    }
}

/// FIFO queue of resting orders at one price level.
pub struct PriceLevel {
    inner: Mutex<Inner>,
}

impl PriceLevel {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Appends `order` to the tail of the queue.
    ///
    /// Precondition (caller-enforced, see `spec.md` §4.1): `order.quantity >
    /// 0` and `order.order_id` is not already present in this level.
    pub fn add(&self, order: Order) {
        let mut inner = self.inner.lock().unwrap();
        let idx = inner.alloc(Node {
            order,
            prev: inner.tail,
            next: None,
        });
        match inner.tail {
            Some(t) => inner.slots[t].as_mut().unwrap().next = Some(idx),
            None => inner.head = Some(idx),
        }
        inner.tail = Some(idx);
        inner.total_qty += order.quantity;
        inner.index.insert(order.order_id, idx);
    }

    /// Removes `order_id` from the queue in O(1) if present. Absent ids are
    /// silently ignored, returning `false`.
    pub fn cancel(&self, order_id: u64) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let Some(idx) = inner.index.remove(&order_id) else {
            return false;
        };
        let qty = inner.slots[idx].unwrap().order.quantity;
        inner.unlink(idx);
        inner.total_qty -= qty;
        true
    }

    /// Subtracts `n` from the head order's quantity. If the head's quantity
    /// reaches zero, the head is removed from the queue and the index.
    ///
    /// Precondition: the queue is non-empty and `n <= front().quantity`.
    pub fn fill_front(&self, n: u64) {
        let mut inner = self.inner.lock().unwrap();
        let head_idx = inner.head.expect("fill_front called on empty level");
        let order_id = inner.slots[head_idx].unwrap().order.order_id;
        let remaining = {
            let node = inner.slots[head_idx].as_mut().unwrap();
            node.order.quantity -= n;
            node.order.quantity
        };
        inner.total_qty -= n;
        if remaining == 0 {
            inner.index.remove(&order_id);
            inner.unlink(head_idx);
        }
    }

    /// Returns a snapshot of the head order. Panics if the level is empty —
    /// this is a programmer error; callers must check [`Self::is_empty`] first.
    pub fn front(&self) -> Order {
        let inner = self.inner.lock().unwrap();
        let head_idx = inner.head.expect("front() called on empty PriceLevel");
        inner.slots[head_idx].unwrap().order
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().head.is_none()
    }

    pub fn total_quantity(&self) -> u64 {
        self.inner.lock().unwrap().total_qty
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::order::Side;

    fn order(id: u64, qty: u64) -> Order {
        Order::new_limit(id, 0, 100.0, qty, Side::Buy)
    }

    #[test]
    fn add_then_front_is_fifo_head() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.add(order(2, 20));
        assert_eq!(level.front().order_id, 1);
        assert_eq!(level.total_quantity(), 30);
    }

    #[test]
    fn fill_front_partial_decrements_head_only() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.add(order(2, 20));
        level.fill_front(4);
        assert_eq!(level.front().order_id, 1);
        assert_eq!(level.front().quantity, 6);
        assert_eq!(level.total_quantity(), 26);
        assert!(!level.is_empty());
    }

    #[test]
    fn fill_front_exact_pops_head_and_advances() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.add(order(2, 20));
        level.fill_front(10);
        assert_eq!(level.front().order_id, 2);
        assert_eq!(level.total_quantity(), 20);
    }

    #[test]
    fn fill_front_last_order_empties_level() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.fill_front(10);
        assert!(level.is_empty());
        assert_eq!(level.total_quantity(), 0);
    }

    #[test]
    fn cancel_removes_from_middle_without_disturbing_fifo_order() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.add(order(2, 20));
        level.add(order(3, 30));
        assert!(level.cancel(2));
        assert_eq!(level.total_quantity(), 40);
        assert_eq!(level.front().order_id, 1);
        level.fill_front(10);
        assert_eq!(level.front().order_id, 3);
    }

    #[test]
    fn cancel_unknown_id_is_noop() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        assert!(!level.cancel(999));
        assert_eq!(level.total_quantity(), 10);
    }

    #[test]
    fn cancel_head_advances_to_next() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.add(order(2, 20));
        assert!(level.cancel(1));
        assert_eq!(level.front().order_id, 2);
        assert_eq!(level.total_quantity(), 20);
    }

    #[test]
    fn cancel_tail_keeps_head_and_total() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.add(order(2, 20));
        assert!(level.cancel(2));
        assert_eq!(level.front().order_id, 1);
        assert_eq!(level.total_quantity(), 10);
    }

    #[test]
    fn slab_slots_are_recycled_after_cancel() {
        let level = PriceLevel::new();
        level.add(order(1, 10));
        level.cancel(1);
        level.add(order(2, 20));
        // The freed slot from order 1 should have been reused rather than
        // growing the slab unboundedly.
        assert_eq!(level.inner.lock().unwrap().slots.len(), 1);
    }

    #[test]
    #[should_panic]
    fn front_on_empty_level_panics() {
        let level = PriceLevel::new();
        level.front();
    }
}
