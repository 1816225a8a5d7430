//! Node storage shared by the bucket table and the order list.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational slot key naming one live node.
    pub(crate) struct NodeKey;
}

/// One live entry. The slot map owns it; chains and the order list link to
/// it through `NodeKey`s only.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) chain_next: Option<NodeKey>,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, hash: u64) -> Self {
        Self {
            key,
            value,
            hash,
            chain_next: None,
            prev: None,
            next: None,
        }
    }

    pub(crate) fn boxed(key: K, value: V, hash: u64) -> Box<Self> {
        Box::new(Self::new(key, value, hash))
    }
}

/// Nodes are boxed so an entry never moves while the slot map grows or
/// reuses slots; `IterMut` relies on that.
pub(crate) type Nodes<K, V> = SlotMap<NodeKey, Box<Node<K, V>>>;
