//! linked-hashmap: a single-threaded hash map that iterates in insertion
//! order, with copyable cursors that survive resizes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: hash-table lookups plus a stable, insertion-ordered walk, with
//!   both structures kept in step by one place that owns every node.
//! - Layers:
//!   - Node store: a `slotmap::SlotMap` owning each boxed entry (key,
//!     value, cached hash, chain link, order links). Slot keys are
//!     generational, so a key to an erased entry never resolves again.
//!     Boxes keep entries in place, which lets `IterMut` follow the order
//!     links lazily.
//!   - BucketTable: `capacity` chain heads; chains are threaded through
//!     the nodes. Index only, never an owner.
//!   - OrderList: head/tail of the doubly-linked insertion order. `None`
//!     ends play the head and tail sentinels; the tail is `end()`.
//!   - LinkedHashMap<K, V, S>: public API tying the three together.
//!
//! Constraints
//! - Single-threaded: no locking, no interior mutability.
//! - O(1) average lookup/insert/erase; duplicate keys are never stored.
//! - Re-inserting a present key changes neither its value nor its place.
//! - A resize rebuilds only the chains, walking the order list; the order
//!   list and every outstanding `Cursor` are left untouched.
//!
//! Resize policy
//! - Growth: when an insert would make `len > capacity`, capacity becomes
//!   `2 * capacity + 1`.
//! - Shrink: when a removal leaves `len * 4 < capacity`, capacity halves,
//!   never below the configured floor (13 by default).
//! - See `ResizePolicy`; the thresholds are named constants.
//! - `with_min_capacity(n)` is not a pre-size hint as in std maps: `n` is
//!   both the starting bucket count and the permanent shrink floor.
//!
//! Hasher and rehashing invariants
//! - Each node stores its `u64` hash; resizing and cloning reuse it and
//!   never call `K: Hash` again.
//!
//! Cursors
//! - `Cursor` carries the map's identity tag and a slot key. Every use
//!   checks both, so `end()`, cursors from another map and cursors to
//!   erased entries fail with `Error::InvalidIterator` before any mutation.
//!
//! Notes and non-goals
//! - No thread-safety, no serialization, no duplicate keys.
//! - `Index` panics on a missing key; inserting access is
//!   `get_or_insert_default`, never implicit.

mod bucket_table;
mod error;
mod iter;
pub mod linked_hash_map;
mod linked_hash_map_proptest;
mod node;
mod order_list;
pub mod policy;

// Public surface
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use linked_hash_map::{Cursor, LinkedHashMap};
pub use policy::{ResizePolicy, DEFAULT_MIN_CAPACITY, SHRINK_LOAD_DIVISOR};
