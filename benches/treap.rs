use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeSet;
use treap_engine::treap::Treap;

const NUM_OF_OPERATIONS: usize = 1000;

fn keys() -> Vec<u32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect()
}

fn bench_treap_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench treap insert", move |b| {
        b.iter(|| {
            let mut treap = Treap::with_seed([1, 1, 1, 1]);
            for key in &keys {
                treap.insert(*key);
            }
            treap
        })
    });
}

fn bench_treap_contains(c: &mut Criterion) {
    let keys = keys();
    let mut treap = Treap::with_seed([1, 1, 1, 1]);
    treap.extend(keys.iter().cloned());

    c.bench_function("bench treap contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(treap.contains(key));
            }
        })
    });
}

fn bench_treap_remove(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench treap remove", move |b| {
        b.iter(|| {
            let mut treap = Treap::with_seed([1, 1, 1, 1]);
            treap.extend(keys.iter().cloned());
            for key in &keys {
                black_box(treap.remove(key));
            }
        })
    });
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench btreeset insert", move |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
            set
        })
    });
}

criterion_group!(
    benches,
    bench_treap_insert,
    bench_treap_contains,
    bench_treap_remove,
    bench_btreeset_insert
);
criterion_main!(benches);
