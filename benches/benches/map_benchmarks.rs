use std::{collections::HashMap, hint::black_box};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use probemap::{CapacityPolicy, OpenAddressedMap};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const N: i64 = 10_000;

fn random_keys(n: usize) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    (0..n).map(|_| rng.gen()).collect()
}

fn filled(policy: CapacityPolicy) -> OpenAddressedMap {
    let mut m = OpenAddressedMap::with_policy(16, 0.7, policy).unwrap();
    for i in 0..N {
        m.insert(i, i).unwrap();
    }
    m
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert 10_000");

    for policy in [CapacityPolicy::Prime, CapacityPolicy::Exact] {
        group.bench_function(BenchmarkId::new("OpenAddressedMap", policy), |b| {
            b.iter(|| {
                let mut m = OpenAddressedMap::with_policy(16, 0.7, policy).unwrap();
                for i in 0..N {
                    let _ = m.insert(black_box(i), black_box(i));
                }
            });
        });
    }

    group.bench_function("HashMap", |b| {
        b.iter(|| {
            let mut m = HashMap::new();
            for i in 0..N {
                m.insert(black_box(i), black_box(i));
            }
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N as usize);

    c.bench_function("insert random 10_000 (OpenAddressedMap)", |b| {
        b.iter(|| {
            let mut m = OpenAddressedMap::default();
            for &k in &keys {
                let _ = m.insert(black_box(k), black_box(k));
            }
        });
    });

    c.bench_function("insert random 10_000 (HashMap)", |b| {
        b.iter(|| {
            let mut m = HashMap::new();
            for &k in &keys {
                m.insert(black_box(k), black_box(k));
            }
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let map = filled(CapacityPolicy::Prime);
    let hashmap: HashMap<i64, i64> = (0..N).map(|i| (i, i)).collect();

    c.bench_function("search 10_000 (OpenAddressedMap)", |b| {
        b.iter(|| {
            for i in 0..N {
                let _ = black_box(map.search(i));
            }
        });
    });

    c.bench_function("search miss 10_000 (OpenAddressedMap)", |b| {
        b.iter(|| {
            for i in N..2 * N {
                let _ = black_box(map.search(i));
            }
        });
    });

    c.bench_function("get 10_000 (HashMap)", |b| {
        b.iter(|| {
            for i in 0..N {
                black_box(hashmap.get(&i));
            }
        });
    });
}

/// Поиск в таблице, где половина записей превратилась в tombstone.
fn bench_search_with_tombstones(c: &mut Criterion) {
    let mut map = filled(CapacityPolicy::Prime);
    for i in (0..N).step_by(2) {
        map.remove(i).unwrap();
    }

    c.bench_function("search through tombstones 10_000", |b| {
        b.iter(|| {
            for i in 0..N {
                let _ = black_box(map.search(i));
            }
        });
    });
}

fn bench_remove(c: &mut Criterion) {
    c.bench_function("insert + remove 10_000 (OpenAddressedMap)", |b| {
        b.iter(|| {
            let mut m = OpenAddressedMap::default();
            for i in 0..N {
                let _ = m.insert(i, i);
            }
            for i in 0..N {
                let _ = m.remove(i);
            }
        });
    });

    c.bench_function("insert + remove 10_000 (HashMap)", |b| {
        b.iter(|| {
            let mut m = HashMap::new();
            for i in 0..N {
                m.insert(i, i);
            }
            for i in 0..N {
                m.remove(&i);
            }
        });
    });
}

fn bench_clear_reuse(c: &mut Criterion) {
    c.bench_function("reuse after clear (OpenAddressedMap)", |b| {
        b.iter(|| {
            let mut m = OpenAddressedMap::default();
            for i in 0..N {
                let _ = m.insert(i, i);
            }
            m.clear();
            for i in 0..N {
                let _ = m.insert(i, i);
            }
        });
    });
}

criterion_group!(
    map_benches,
    bench_insert,
    bench_insert_random,
    bench_search,
    bench_search_with_tombstones,
    bench_remove,
    bench_clear_reuse
);
criterion_main!(map_benches);
