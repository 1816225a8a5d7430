#![cfg(test)]

// Property tests for LinkedHashMap kept inside the crate so they can inspect
// the bucket table alongside the public API.

use crate::error::Error;
use crate::linked_hash_map::{Cursor, LinkedHashMap};
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks
// in length, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    InsertWith(usize, i32),
    GetOrInsertDefault(usize, i32),
    Erase(usize),
    Remove(usize),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Walk,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::InsertWith(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::GetOrInsertDefault(i, d)),
            2 => idx.clone().prop_map(OpI::Erase),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Find),
            1 => prop_oneof![contains_pool, "[a-z]{0,4}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Walk),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Insertion-ordered reference model: a plain vector of entries.
#[derive(Default)]
struct Model {
    entries: Vec<(Key, i32)>,
}

impl Model {
    fn position(&self, k: &Key) -> Option<usize> {
        self.entries.iter().position(|(x, _)| x == k)
    }
    fn get(&self, k: &Key) -> Option<i32> {
        self.position(k).map(|i| self.entries[i].1)
    }
    fn remove(&mut self, k: &Key) -> Option<i32> {
        let i = self.position(k)?;
        Some(self.entries.remove(i).1)
    }
}

fn run_state_machine<S>(
    mut sut: LinkedHashMap<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model = Model::default();
    let mut live: HashMap<Key, Cursor> = HashMap::new();
    let mut stale: Vec<Cursor> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(&pool, i);
                let before = model.get(&k);
                let (c, inserted) = sut.insert(k.clone(), v);
                prop_assert_eq!(inserted, before.is_none());
                match before {
                    Some(old) => {
                        prop_assert_eq!(c.value(&sut), Ok(&old), "re-insert keeps value");
                        prop_assert_eq!(Some(&c), live.get(&k));
                    }
                    None => {
                        model.entries.push((k.clone(), v));
                        live.insert(k, c);
                    }
                }
            }
            OpI::InsertWith(i, v) => {
                let k = key_from(&pool, i);
                let present = model.get(&k).is_some();
                let mut ran = false;
                let (c, inserted) = sut.insert_with(k.clone(), || {
                    ran = true;
                    v
                });
                prop_assert_eq!(inserted, !present);
                prop_assert_eq!(ran, !present, "constructor runs only on insert");
                if inserted {
                    model.entries.push((k.clone(), v));
                    live.insert(k, c);
                }
            }
            OpI::GetOrInsertDefault(i, d) => {
                let k = key_from(&pool, i);
                let slot = sut.get_or_insert_default(k.clone());
                *slot = slot.wrapping_add(d);
                let after = *slot;
                match model.position(&k) {
                    Some(p) => model.entries[p].1 = model.entries[p].1.wrapping_add(d),
                    None => {
                        model.entries.push((k.clone(), d));
                        live.insert(k.clone(), sut.find(&k));
                    }
                }
                prop_assert_eq!(Some(after), model.get(&k));
            }
            OpI::Erase(i) => {
                let k = key_from(&pool, i);
                let c = sut.find(&k);
                match model.remove(&k) {
                    Some(mv) => {
                        let (kk, vv) = sut.erase(c).expect("live cursor erases");
                        prop_assert_eq!(&kk, &k);
                        prop_assert_eq!(vv, mv);
                        live.remove(&k);
                        stale.push(c);
                    }
                    None => {
                        prop_assert!(c.is_end());
                        prop_assert_eq!(sut.erase(c), Err(Error::InvalidIterator));
                    }
                }
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                if let Some(c) = live.remove(&k) {
                    stale.push(c);
                }
            }
            OpI::Find(i) => {
                let k = key_from(&pool, i);
                let c = sut.find(&k);
                prop_assert_eq!(c.is_end(), model.get(&k).is_none());
                prop_assert_eq!(sut.count(&k), usize::from(!c.is_end()));
                if let Some(&lc) = live.get(&k) {
                    prop_assert_eq!(c, lc, "cursor identity is stable");
                }
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.entries.iter().any(|(k, _)| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                if let Some(&c) = live.get(&k) {
                    let v = c.value_mut(&mut sut).expect("live cursor resolves");
                    *v = v.wrapping_add(d);
                    if let Some(p) = model.position(&k) {
                        model.entries[p].1 = model.entries[p].1.wrapping_add(d);
                    }
                }
            }
            OpI::Iterate => {
                let got: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(&got, &model.entries);
                let rev: Vec<Key> = sut.keys().rev().cloned().collect();
                let mut expect: Vec<Key> = model.entries.iter().map(|(k, _)| k.clone()).collect();
                expect.reverse();
                prop_assert_eq!(rev, expect);
            }
            OpI::Walk => {
                let mut c = sut.begin();
                let mut got = Vec::new();
                while !c.is_end() {
                    got.push(c.key(&sut).expect("walk stays on live entries").clone());
                    c = c.next(&sut).expect("step before end");
                }
                prop_assert_eq!(c.next(&sut), Err(Error::InvalidIterator));
                let expect: Vec<Key> = model.entries.iter().map(|(k, _)| k.clone()).collect();
                prop_assert_eq!(got, expect);
            }
            OpI::Clear => {
                sut.clear();
                model.entries.clear();
                stale.extend(live.drain().map(|(_, c)| c));
                prop_assert_eq!(sut.capacity(), sut.policy().min_capacity());
            }
        }

        // Post-conditions after each op
        // 1) Stale cursors never resolve.
        for &c in &stale {
            prop_assert!(c.value(&sut).is_err());
        }
        // 2) Live cursors still point at their own entry.
        for (k, c) in &live {
            prop_assert_eq!(c.key(&sut), Ok(k));
        }
        // 3) Size parity and the load bound.
        prop_assert_eq!(sut.len(), model.entries.len());
        prop_assert_eq!(sut.is_empty(), model.entries.is_empty());
        prop_assert!(sut.len() <= sut.capacity());
    }
    Ok(())
}

// Property: state-machine equivalence against an insertion-ordered model.
// Invariants exercised across random operation sequences:
// - Iteration order equals first-insertion order, through every resize.
// - Re-insert never moves a key or overwrites its value.
// - Erase/remove drop exactly one entry and keep the others' order.
// - Cursors are stable while live and never resolve once erased or cleared.
// - `len <= capacity` after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(LinkedHashMap::new(), pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one chain.
// Also used by the unit tests in `linked_hash_map`.
#[derive(Clone, Default)]
pub(crate) struct ConstBuildHasher;
pub(crate) struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions and the smallest
// possible table floor, which maximises resize traffic.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = LinkedHashMap::with_min_capacity_and_hasher(1, ConstBuildHasher);
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: every node sits in exactly the chain its cached hash selects,
// and the chains hold exactly `len` nodes in total.
proptest! {
    #[test]
    fn prop_chains_cover_all_nodes(keys in proptest::collection::vec(0u32..500, 0..200), erase_every in 2usize..5) {
        let mut m: LinkedHashMap<u32, u32> = LinkedHashMap::new();
        for &k in &keys {
            m.insert(k, k);
        }
        let doomed: Vec<u32> = m.keys().copied().step_by(erase_every).collect();
        for k in doomed {
            prop_assert_eq!(m.remove(&k), Some(k));
        }
        let (nodes, table) = m.structure();
        let total: usize = (0..table.capacity()).map(|b| table.chain_len(nodes, b)).sum();
        prop_assert_eq!(total, m.len());
        for (k, _) in nodes.iter() {
            let h = nodes[k].hash;
            prop_assert_eq!(table.find(nodes, h, |x| *x == nodes[k].key), Some(k));
        }
    }
}
