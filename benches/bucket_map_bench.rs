use bucket_map::{BucketMap, Djb2};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
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

const BUCKETS: usize = 1024;

fn bench_insert(c: &mut Criterion) {
    c.bench_function("bucket_map_insert_10k", |b| {
        b.iter_batched(
            || BucketMap::<String, u64, Djb2>::with_buckets(BUCKETS),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("bucket_map_get_hit", |b| {
        let mut m = BucketMap::<String, u64, Djb2>::with_buckets(BUCKETS);
        let keys: Vec<_> = lcg(7).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.clone(), i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("bucket_map_get_miss", |b| {
        let mut m = BucketMap::<String, u64, Djb2>::with_buckets(BUCKETS);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.insert(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("bucket_map_iterate_10k", |b| {
        let mut m = BucketMap::<String, u64, Djb2>::with_buckets(BUCKETS);
        for (i, x) in lcg(13).take(10_000).enumerate() {
            m.insert(key(x), i as u64).unwrap();
        }
        b.iter(|| {
            let sum: u64 = m.iter().map(|(_, v)| *v).sum();
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_iterate
}
criterion_main!(benches);
