use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use bstree::{AvlTree, BinarySearchTree};

// Every AVL mutation rebalances the whole tree, so keep this small.
const N: usize = 1_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("bst_insert", |b| {
        b.iter(|| {
            let mut tree = BinarySearchTree::new();
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    c.bench_function("avl_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    let tree: AvlTree<i32> = values.iter().copied().collect();

    c.bench_function("avl_search", |b| {
        b.iter(|| {
            for value in &values {
                let _ = black_box(tree.search(value));
            }
        })
    });

    c.bench_function("avl_traverse_breadth_first", |b| {
        b.iter(|| black_box(tree.traverse_breadth_first()))
    });

    c.bench_function("avl_delete", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            for value in &values {
                let _ = tree.delete(value);
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
