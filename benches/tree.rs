extern crate etalage;

use criterion::{Criterion, criterion_group, criterion_main};

// Fresh trees per iteration on both sides: duplicate keys are a caller
// error for the splay tree, and rbtree would silently replace them.
fn insert(c: &mut Criterion) {
    c.bench_function("etalage_insert", |b| {
        b.iter(|| {
            let mut tree = etalage::SplayTree::new();
            for k in 0..100 {
                tree.insert(k);
            }
        })
    });
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            let mut tree = rbtree::RBTree::<i64, ()>::new();
            for k in 0..100 {
                tree.insert(k, ());
            }
        })
    });
}

fn find(c: &mut Criterion) {
    let mut tree = etalage::SplayTree::new();
    for k in 0..1000 {
        tree.insert(k);
    }
    // Repeated hits on a small working set, the splay tree's home turf.
    c.bench_function("etalage_find_working_set", |b| {
        b.iter(|| {
            for k in 0..10 {
                let _ = tree.find(k);
            }
        })
    });
}

criterion_group!(benches, insert, find);
criterion_main!(benches);
