use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use linked_hashmap::{Cursor, LinkedHashMap};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("linked::insert_fresh_100k", |b| {
        b.iter_batched(
            LinkedHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_erase_random_10k(c: &mut Criterion) {
    c.bench_function("linked::erase_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let mut m = LinkedHashMap::new();
                let cursors: Vec<Cursor> = lcg(5)
                    .take(110_000)
                    .enumerate()
                    .map(|(i, x)| m.insert(key(x), i as u64).0)
                    .collect();
                let n = cursors.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_erase: Vec<Cursor> = sel.into_iter().map(|i| cursors[i]).collect();
                (m, to_erase)
            },
            |(mut m, to_erase)| {
                for c in to_erase {
                    let _ = m.erase(c);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    c.bench_function("linked::find_hit_10k_on_100k", |b| {
        let mut m = LinkedHashMap::new();
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.clone(), i as u64);
        }
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.find(k.as_str()));
            }
        })
    });
}

fn bench_iterate_100k(c: &mut Criterion) {
    c.bench_function("linked::iterate_100k", |b| {
        let mut m = LinkedHashMap::new();
        for (i, x) in lcg(13).take(100_000).enumerate() {
            m.insert(key(x), i as u64);
        }
        b.iter(|| black_box(m.values().sum::<u64>()))
    });
}

fn bench_insert_erase_churn(c: &mut Criterion) {
    c.bench_function("linked::insert_erase_churn_10k", |b| {
        b.iter_batched(
            LinkedHashMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(17).take(10_000).enumerate() {
                    m.insert(x, i as u64);
                    if i % 2 == 1 {
                        let first = m.begin();
                        let _ = m.erase(first);
                    }
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_erase_random_10k, bench_find_hit_10k,
        bench_iterate_100k, bench_insert_erase_churn
}
criterion_main!(benches);
