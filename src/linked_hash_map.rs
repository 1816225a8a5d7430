//! LinkedHashMap: bucket table plus insertion-order list over one node store.

use crate::bucket_table::BucketTable;
use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::node::{Node, NodeKey, Nodes};
use crate::order_list::OrderList;
use crate::policy::ResizePolicy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::hash_map::DefaultHashBuilder;

/// Identity tag of one map instance. Clones get a fresh tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct MapId(u64);

impl MapId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A position in a [`LinkedHashMap`]: either an entry or `end()`.
///
/// Cursors borrow nothing. They stay valid across inserts and resizes and
/// are checked against their map on every use, so a cursor from another map
/// or to an erased entry yields [`Error::InvalidIterator`] instead of
/// touching the wrong entry. The same cursor serves shared and mutable
/// access; which one you get depends on how the map is passed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    map: MapId,
    node: Option<NodeKey>,
}

impl Cursor {
    /// True for the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub fn key<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<&'a K> {
        map.cursor_node(*self).map(|n| &n.key)
    }

    pub fn value<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<&'a V> {
        map.cursor_node(*self).map(|n| &n.value)
    }

    pub fn entry<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<(&'a K, &'a V)> {
        map.cursor_node(*self).map(|n| (&n.key, &n.value))
    }

    pub fn value_mut<'a, K, V, S>(&self, map: &'a mut LinkedHashMap<K, V, S>) -> Result<&'a mut V> {
        map.cursor_node_mut(*self).map(|n| &mut n.value)
    }

    /// Step towards `end()`. Fails when already at `end()`.
    pub fn next<K, V, S>(self, map: &LinkedHashMap<K, V, S>) -> Result<Cursor> {
        let node = map.cursor_node(self)?;
        Ok(Cursor {
            map: self.map,
            node: node.next,
        })
    }

    /// Step towards the first entry. Fails when already on the first entry,
    /// or on `end()` of an empty map.
    pub fn prev<K, V, S>(self, map: &LinkedHashMap<K, V, S>) -> Result<Cursor> {
        map.check_owner(self)?;
        let prev = match self.node {
            Some(k) => map.nodes.get(k).ok_or(Error::InvalidIterator)?.prev,
            None => map.order.back(),
        };
        match prev {
            Some(k) => Ok(Cursor {
                map: self.map,
                node: Some(k),
            }),
            None => Err(Error::InvalidIterator),
        }
    }
}

/// A hash map that iterates in insertion order.
///
/// Re-inserting a key that is already present keeps both its value and its
/// position. Removing a key and inserting it again places it at the back.
///
/// ```
/// use linked_hashmap::LinkedHashMap;
///
/// let mut m = LinkedHashMap::new();
/// m.insert("a", 1);
/// m.insert("b", 2);
/// m.insert("c", 3);
/// m.erase(m.find("b")).unwrap();
/// *m.get_or_insert_default("b") = 5;
/// let order: Vec<_> = m.keys().copied().collect();
/// assert_eq!(order, ["a", "c", "b"]);
/// ```
pub struct LinkedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    nodes: Nodes<K, V>,
    table: BucketTable,
    order: OrderList,
    policy: ResizePolicy,
    id: MapId,
}

impl<K, V> LinkedHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Empty map whose bucket table starts at, and never shrinks below,
    /// `min_capacity` buckets.
    pub fn with_min_capacity(min_capacity: usize) -> Self {
        Self::with_min_capacity_and_hasher(min_capacity, Default::default())
    }
}

impl<K, V> Default for LinkedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

// Accessors that need neither hashing nor equality.
impl<K, V, S> LinkedHashMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Cursor on the first entry, or `end()` when empty.
    pub fn begin(&self) -> Cursor {
        self.cursor(self.order.front())
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor {
        self.cursor(None)
    }

    pub fn front(&self) -> Option<(&K, &V)> {
        let n = self.nodes.get(self.order.front()?)?;
        Some((&n.key, &n.value))
    }

    pub fn back(&self) -> Option<(&K, &V)> {
        let n = self.nodes.get(self.order.back()?)?;
        Some((&n.key, &n.value))
    }

    /// Remove every entry and return the table to its minimum capacity.
    /// Outstanding cursors into this map become invalid.
    pub fn clear(&mut self) {
        log::trace!("clearing linked hash map with {} entries", self.len());
        self.order.clear_all(&mut self.nodes);
        self.table.reset(self.policy.min_capacity());
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, &self.order)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.nodes, &self.order)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    fn cursor(&self, node: Option<NodeKey>) -> Cursor {
        Cursor { map: self.id, node }
    }

    fn check_owner(&self, c: Cursor) -> Result<()> {
        if c.map == self.id {
            Ok(())
        } else {
            Err(Error::InvalidIterator)
        }
    }

    /// Resolve a cursor to a live node of this map.
    fn cursor_key(&self, c: Cursor) -> Result<NodeKey> {
        self.check_owner(c)?;
        match c.node {
            Some(k) if self.nodes.contains_key(k) => Ok(k),
            _ => Err(Error::InvalidIterator),
        }
    }

    fn cursor_node(&self, c: Cursor) -> Result<&Node<K, V>> {
        let k = self.cursor_key(c)?;
        self.nodes.get(k).map(|n| &**n).ok_or(Error::InvalidIterator)
    }

    fn cursor_node_mut(&mut self, c: Cursor) -> Result<&mut Node<K, V>> {
        let k = self.cursor_key(c)?;
        self.nodes.get_mut(k).map(|n| &mut **n).ok_or(Error::InvalidIterator)
    }

    /// Unlink `k` from both structures, free it, then shrink if due.
    fn remove_node(&mut self, k: NodeKey) -> Option<(K, V)> {
        self.table.remove_from_chain(&mut self.nodes, k);
        self.order.unlink(&mut self.nodes, k);
        let node = *self.nodes.remove(k)?;
        let cap = self.table.capacity();
        if self.policy.should_shrink(self.len(), cap) {
            self.rebuild(self.policy.shrunk(cap));
        }
        Some((node.key, node.value))
    }

    fn rebuild(&mut self, new_capacity: usize) {
        log::debug!(
            "resizing bucket table {} -> {} ({} entries)",
            self.table.capacity(),
            new_capacity,
            self.len()
        );
        self.table.resize(&mut self.nodes, &self.order, new_capacity);
    }

    /// Grow if due, then create the node and thread it into the order list
    /// and its chain. Callers have already checked that the key is absent.
    fn link_new(&mut self, key: K, value: V, hash: u64) -> NodeKey {
        let cap = self.table.capacity();
        if self.policy.should_grow(self.len() + 1, cap) {
            self.rebuild(self.policy.grown(cap));
        }
        let k = self.nodes.insert(Node::boxed(key, value, hash));
        self.order.append(&mut self.nodes, k);
        self.table.insert_node(&mut self.nodes, k);
        k
    }

    #[cfg(test)]
    pub(crate) fn structure(&self) -> (&Nodes<K, V>, &BucketTable) {
        (&self.nodes, &self.table)
    }

    /// Remove the entry under `cursor` and return it.
    ///
    /// Fails with [`Error::InvalidIterator`] for `end()`, a cursor from
    /// another map, or a cursor whose entry is already gone. The map is left
    /// untouched on failure. Other cursors stay valid.
    pub fn erase(&mut self, cursor: Cursor) -> Result<(K, V)> {
        let k = self.cursor_key(cursor)?;
        self.remove_node(k).ok_or(Error::InvalidIterator)
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_policy_and_hasher(ResizePolicy::default(), hasher)
    }

    pub fn with_min_capacity_and_hasher(min_capacity: usize, hasher: S) -> Self {
        Self::with_policy_and_hasher(ResizePolicy::new(min_capacity), hasher)
    }

    pub fn with_policy_and_hasher(policy: ResizePolicy, hasher: S) -> Self {
        Self {
            hasher,
            nodes: Nodes::with_key(),
            table: BucketTable::with_capacity(policy.min_capacity()),
            order: OrderList::new(),
            policy,
            id: MapId::fresh(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn find_key<Q>(&self, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.table.find(&self.nodes, hash, |k| k.borrow() == q)
    }

    /// Cursor on `q`'s entry, or `end()` when absent.
    pub fn find<Q>(&self, q: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.cursor(self.find_key(q))
    }

    /// 1 when `q` is present, else 0.
    pub fn count<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        usize::from(self.contains_key(q))
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_key(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_key(q)?;
        self.nodes.get(k).map(|n| &n.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_key(q)?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    /// Bounds-checked lookup; never inserts.
    pub fn at<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).ok_or(Error::KeyNotFound)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(q).ok_or(Error::KeyNotFound)
    }

    /// Insert `key -> value` at the back unless `key` is present.
    ///
    /// Returns a cursor on the entry for `key` and whether it was inserted.
    /// An existing entry keeps its value and its position.
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        let hash = self.make_hash(&key);
        if let Some(k) = self.table.find(&self.nodes, hash, |x| *x == key) {
            return (self.cursor(Some(k)), false);
        }
        let k = self.link_new(key, value, hash);
        (self.cursor(Some(k)), true)
    }

    /// Like [`insert`](Self::insert), but builds the value only when the key
    /// is absent.
    pub fn insert_with<F>(&mut self, key: K, default: F) -> (Cursor, bool)
    where
        F: FnOnce() -> V,
    {
        let hash = self.make_hash(&key);
        if let Some(k) = self.table.find(&self.nodes, hash, |x| *x == key) {
            return (self.cursor(Some(k)), false);
        }
        let k = self.link_new(key, default(), hash);
        (self.cursor(Some(k)), true)
    }

    /// Value for `key`, inserting `default()` at the back first when absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = self.make_hash(&key);
        let k = match self.table.find(&self.nodes, hash, |x| *x == key) {
            Some(k) => k,
            None => self.link_new(key, default(), hash),
        };
        &mut self.nodes[k].value
    }

    /// Indexing that inserts.
    ///
    /// Unlike a pure lookup this mutates the map: an absent `key` gets a new
    /// entry holding `V::default()`, appended at the back.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Remove `q` and return its value. Equivalent to `erase(find(q))`.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_key(q)?;
        self.remove_node(k).map(|(_, v)| v)
    }
}

impl<K, V, S> Clone for LinkedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// Deep copy with the source's capacity, appended in the source's order.
    fn clone(&self) -> Self {
        let mut out = Self {
            hasher: self.hasher.clone(),
            nodes: Nodes::with_capacity_and_key(self.len()),
            table: BucketTable::with_capacity(self.capacity()),
            order: OrderList::new(),
            policy: self.policy,
            id: MapId::fresh(),
        };
        out.copy_entries_from(self);
        out
    }

    /// Assignment: clear, then copy. Keeps this map's identity, so its old
    /// cursors are invalidated rather than aliased.
    fn clone_from(&mut self, source: &Self) {
        self.order.clear_all(&mut self.nodes);
        self.hasher = source.hasher.clone();
        self.policy = source.policy;
        self.table.reset(source.capacity());
        self.copy_entries_from(source);
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
{
    // Hashers are clones, so cached hashes carry over without rehashing.
    fn copy_entries_from(&mut self, source: &Self) {
        for k in source.order.keys(&source.nodes) {
            let n = &source.nodes[k];
            self.link_new(n.key.clone(), n.value.clone(), n.hash);
        }
    }
}

impl<K, V, S> fmt::Debug for LinkedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they hold the same entries in the same order.
impl<K, V, S> PartialEq for LinkedHashMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for LinkedHashMap<K, V, S> {}

/// Panics when the key is absent; use [`LinkedHashMap::at`] to get an error
/// instead. There is no `IndexMut`: inserting access goes through
/// [`LinkedHashMap::get_or_insert_default`].
impl<K, Q, V, S> Index<&Q> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<K, V, S> IntoIterator for LinkedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.nodes, self.order)
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
