//! Chained bucket index over the node store.
//!
//! Each bucket holds the head of a singly-linked chain threaded through
//! `Node::chain_next`. The table never owns nodes; it only orders keys into
//! chains by `hash % capacity`.

use crate::node::{NodeKey, Nodes};
use crate::order_list::OrderList;

#[derive(Debug, Clone)]
pub(crate) struct BucketTable {
    heads: Vec<Option<NodeKey>>,
}

impl BucketTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heads: vec![None; capacity.max(1)],
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    fn bucket(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    /// Scan the chain for `hash`, returning the first node whose cached hash
    /// matches and for which `eq` holds.
    pub(crate) fn find<K, V, F>(&self, nodes: &Nodes<K, V>, hash: u64, mut eq: F) -> Option<NodeKey>
    where
        F: FnMut(&K) -> bool,
    {
        let mut cur = self.heads[self.bucket(hash)];
        while let Some(k) = cur {
            let node = nodes.get(k)?;
            if node.hash == hash && eq(&node.key) {
                return Some(k);
            }
            cur = node.chain_next;
        }
        None
    }

    /// Push an existing node onto the head of its chain.
    pub(crate) fn insert_node<K, V>(&mut self, nodes: &mut Nodes<K, V>, k: NodeKey) {
        let Some(node) = nodes.get_mut(k) else {
            return;
        };
        let b = (node.hash % self.heads.len() as u64) as usize;
        node.chain_next = self.heads[b];
        self.heads[b] = Some(k);
    }

    /// Unlink `k` from its chain. The node stays in the store.
    pub(crate) fn remove_from_chain<K, V>(&mut self, nodes: &mut Nodes<K, V>, k: NodeKey) {
        let Some(hash) = nodes.get(k).map(|n| n.hash) else {
            return;
        };
        let b = self.bucket(hash);
        let next = nodes.get_mut(k).and_then(|n| n.chain_next.take());

        if self.heads[b] == Some(k) {
            self.heads[b] = next;
            return;
        }
        let mut cur = self.heads[b];
        while let Some(c) = cur {
            let Some(node) = nodes.get_mut(c) else {
                break;
            };
            if node.chain_next == Some(k) {
                node.chain_next = next;
                return;
            }
            cur = node.chain_next;
        }
        debug_assert!(false, "node missing from its bucket chain");
    }

    /// Rebuild with `new_capacity` buckets by walking the order list; the
    /// old chains are discarded unread.
    pub(crate) fn resize<K, V>(&mut self, nodes: &mut Nodes<K, V>, order: &OrderList, new_capacity: usize) {
        self.heads = vec![None; new_capacity.max(1)];
        let mut cur = order.front();
        while let Some(k) = cur {
            self.insert_node(nodes, k);
            cur = nodes.get(k).and_then(|n| n.next);
        }
    }

    /// Empty every chain and set the bucket count to `capacity`.
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.heads.clear();
        self.heads.resize(capacity.max(1), None);
    }

    #[cfg(test)]
    pub(crate) fn chain_len<K, V>(&self, nodes: &Nodes<K, V>, bucket: usize) -> usize {
        let mut n = 0;
        let mut cur = self.heads[bucket];
        while let Some(k) = cur {
            n += 1;
            cur = nodes.get(k).and_then(|x| x.chain_next);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn add(table: &mut BucketTable, order: &mut OrderList, nodes: &mut Nodes<u32, ()>, key: u32, hash: u64) -> NodeKey {
        let k = nodes.insert(Node::boxed(key, (), hash));
        order.append(nodes, k);
        table.insert_node(nodes, k);
        k
    }

    #[test]
    fn find_uses_hash_and_eq() {
        let mut nodes = Nodes::with_key();
        let mut order = OrderList::new();
        let mut t = BucketTable::with_capacity(7);
        let a = add(&mut t, &mut order, &mut nodes, 1, 3);
        let b = add(&mut t, &mut order, &mut nodes, 2, 10); // same bucket as hash 3
        assert_eq!(t.chain_len(&nodes, 3), 2);

        assert_eq!(t.find(&nodes, 3, |k| *k == 1), Some(a));
        assert_eq!(t.find(&nodes, 10, |k| *k == 2), Some(b));
        assert_eq!(t.find(&nodes, 3, |k| *k == 2), None, "hash mismatch is a miss");
        assert_eq!(t.find(&nodes, 4, |_| true), None);
    }

    /// Removing the chain head, an interior node and the last node keeps the
    /// rest of the chain reachable.
    #[test]
    fn remove_from_chain_positions() {
        let mut nodes = Nodes::with_key();
        let mut order = OrderList::new();
        let mut t = BucketTable::with_capacity(1);
        let keys: Vec<_> = (0..4).map(|i| add(&mut t, &mut order, &mut nodes, i, i as u64)).collect();
        // chain is 3 -> 2 -> 1 -> 0
        t.remove_from_chain(&mut nodes, keys[3]);
        t.remove_from_chain(&mut nodes, keys[1]);
        t.remove_from_chain(&mut nodes, keys[0]);
        assert_eq!(t.chain_len(&nodes, 0), 1);
        assert_eq!(t.find(&nodes, 2, |k| *k == 2), Some(keys[2]));
        assert_eq!(t.find(&nodes, 1, |k| *k == 1), None);
    }

    /// Resize re-chains every node under the new modulus and leaves the order
    /// list alone.
    #[test]
    fn resize_rechains_all_nodes() {
        let mut nodes = Nodes::with_key();
        let mut order = OrderList::new();
        let mut t = BucketTable::with_capacity(3);
        let keys: Vec<_> = (0..20).map(|i| add(&mut t, &mut order, &mut nodes, i, i as u64 * 7)).collect();

        t.resize(&mut nodes, &order, 13);
        assert_eq!(t.capacity(), 13);
        let total: usize = (0..13).map(|b| t.chain_len(&nodes, b)).sum();
        assert_eq!(total, 20);
        for (i, &k) in keys.iter().enumerate() {
            assert_eq!(t.find(&nodes, i as u64 * 7, |x| *x == i as u32), Some(k));
        }
        let walked: Vec<u32> = order.keys(&nodes).map(|k| nodes[k].key).collect();
        assert_eq!(walked, (0..20).collect::<Vec<_>>());
    }
}
