//! Insertion-order iterators for `LinkedHashMap`.
//!
//! All iterators walk the order list, never the bucket table, and are
//! double-ended. `front`/`back` close in on each other and `remaining`
//! stops them once they meet.

use crate::node::{Node, NodeKey, Nodes};
use crate::order_list::OrderList;
use std::iter::FusedIterator;

/// Iterator over `(&K, &V)` in insertion order.
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, order: &OrderList) -> Self {
        Self {
            nodes,
            front: order.front(),
            back: order.back(),
            remaining: nodes.len(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.nodes.get(self.front?)?;
        self.front = n.next;
        self.remaining -= 1;
        Some((&n.key, &n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.nodes.get(self.back?)?;
        self.back = n.prev;
        self.remaining -= 1;
        Some((&n.key, &n.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Iterator over `(&K, &mut V)` in insertion order.
///
/// Walks the order links lazily, like `Iter`; `remaining` guarantees each
/// node is handed out at most once.
pub struct IterMut<'a, K, V> {
    nodes: &'a mut Nodes<K, V>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(nodes: &'a mut Nodes<K, V>, order: &OrderList) -> Self {
        Self {
            remaining: nodes.len(),
            front: order.front(),
            back: order.back(),
            nodes,
        }
    }

    fn take(&mut self, k: NodeKey) -> Option<&'a mut Node<K, V>> {
        let node: *mut Node<K, V> = &mut **self.nodes.get_mut(k)?;
        self.remaining -= 1;
        // SAFETY: every node lives in its own box, which the slot map never
        // frees or moves while it is borrowed for 'a. The front and back
        // walks stop once `remaining` hits zero, so no key is taken twice
        // and the returned borrows are disjoint.
        Some(unsafe { &mut *node })
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.take(self.front?)?;
        self.front = n.next;
        Some((&n.key, &mut n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.take(self.back?)?;
        self.back = n.prev;
        Some((&n.key, &mut n.value))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// Owning iterator over `(K, V)` in insertion order.
pub struct IntoIter<K, V> {
    nodes: Nodes<K, V>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(nodes: Nodes<K, V>, order: OrderList) -> Self {
        Self {
            front: order.front(),
            back: order.back(),
            nodes,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let n = *self.nodes.remove(self.front?)?;
        self.front = n.next;
        if self.nodes.is_empty() {
            self.front = None;
            self.back = None;
        }
        Some((n.key, n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let n = *self.nodes.remove(self.back?)?;
        self.back = n.prev;
        if self.nodes.is_empty() {
            self.front = None;
            self.back = None;
        }
        Some((n.key, n.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Keys in insertion order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}
impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// Values in insertion order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}
impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// Mutable values in insertion order.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}
impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}
