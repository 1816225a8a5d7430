//! Insertion-order list threaded through the node store.
//!
//! `head` and `tail` act as the sentinels: a `None` predecessor means the
//! node follows the head sentinel, a `None` successor means it precedes the
//! tail sentinel (`end()`).

use crate::node::{NodeKey, Nodes};

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct OrderList {
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl OrderList {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub(crate) fn front(&self) -> Option<NodeKey> {
        self.head
    }

    #[inline]
    pub(crate) fn back(&self) -> Option<NodeKey> {
        self.tail
    }

    /// Link `k` just before the tail sentinel.
    pub(crate) fn append<K, V>(&mut self, nodes: &mut Nodes<K, V>, k: NodeKey) {
        let old_tail = self.tail;
        if let Some(n) = nodes.get_mut(k) {
            n.prev = old_tail;
            n.next = None;
        }
        match old_tail.and_then(|t| nodes.get_mut(t)) {
            Some(t) => t.next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    /// Splice `k` out using its own links. The node stays in the store.
    pub(crate) fn unlink<K, V>(&mut self, nodes: &mut Nodes<K, V>, k: NodeKey) {
        let Some(n) = nodes.get_mut(k) else {
            return;
        };
        let (prev, next) = (n.prev.take(), n.next.take());
        match prev.and_then(|p| nodes.get_mut(p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|x| nodes.get_mut(x)) {
            Some(x) => x.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Drop every node, leaving the sentinels adjacent.
    pub(crate) fn clear_all<K, V>(&mut self, nodes: &mut Nodes<K, V>) {
        nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Node keys from front to back.
    pub(crate) fn keys<'a, K, V>(&self, nodes: &'a Nodes<K, V>) -> OrderKeys<'a, K, V> {
        OrderKeys {
            nodes,
            cur: self.head,
        }
    }
}

/// Forward walk over the order list, yielding node keys.
pub(crate) struct OrderKeys<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    cur: Option<NodeKey>,
}

impl<'a, K, V> Iterator for OrderKeys<'a, K, V> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let k = self.cur?;
        self.cur = self.nodes.get(k).and_then(|n| n.next);
        Some(k)
    }
}
