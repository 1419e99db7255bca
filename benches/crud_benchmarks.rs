use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ravl_tree::RavlSet;
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("RavlSet", N), |b| {
        b.iter(|| {
            let mut set = RavlSet::new();
            for &k in keys {
                set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "set_insert_ordered", &ordered_keys(N));
}

fn bench_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "set_insert_reverse", &reverse_ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "set_insert_random", &random_keys(N));
}

// ─── Lookup and removal Benchmarks ──────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let ra_set: RavlSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_contains");

    group.bench_function(BenchmarkId::new("RavlSet", N), |b| {
        b.iter(|| keys.iter().filter(|k| ra_set.contains(k)).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|k| bt_set.contains(k)).count());
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("set_remove");

    group.bench_function(BenchmarkId::new("RavlSet", N), |b| {
        b.iter(|| {
            let mut set: RavlSet<i64> = keys.iter().copied().collect();
            for k in &keys {
                set.remove(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set: BTreeSet<i64> = keys.iter().copied().collect();
            for k in &keys {
                set.remove(k);
            }
            set
        });
    });

    group.finish();
}

// ─── Order-statistic Benchmarks ─────────────────────────────────────────────

// BTreeSet has no rank operations; iterator skipping is its O(n) stand-in.
fn bench_rank_queries(c: &mut Criterion) {
    let keys = random_keys(N);
    let ra_set: RavlSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    let ranks: Vec<usize> = (0..ra_set.len()).step_by(97).collect();

    let mut group = c.benchmark_group("set_get_by_rank");

    group.bench_function(BenchmarkId::new("RavlSet", N), |b| {
        b.iter(|| ranks.iter().map(|&r| *ra_set.get_by_rank(r).unwrap()).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeSet (iter::nth)", N), |b| {
        b.iter(|| ranks.iter().map(|&r| *bt_set.iter().nth(r).unwrap()).sum::<i64>());
    });

    group.finish();

    let mut group = c.benchmark_group("set_rank_of");

    group.bench_function(BenchmarkId::new("RavlSet", N), |b| {
        b.iter(|| keys.iter().step_by(97).map(|k| ra_set.rank_of(k).unwrap()).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("BTreeSet (iter::position)", N), |b| {
        b.iter(|| {
            keys.iter().step_by(97).map(|k| bt_set.iter().position(|v| v == k).unwrap()).sum::<usize>()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_reverse,
    bench_insert_random,
    bench_contains,
    bench_remove,
    bench_rank_queries,
);
criterion_main!(benches);
