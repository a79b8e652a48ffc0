//! Merkle interval tree benchmarks: build, prove and verify over block-sized
//! leaf sets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pc_01_merkle_interval_tree::{MerkleIntervalTree, MerkleIntervalTreeLeafNode};
use rand::seq::SliceRandom;
use shared_types::U256;

fn leaves(count: u64) -> Vec<MerkleIntervalTreeLeafNode> {
    let mut leaves: Vec<_> = (0..count)
        .map(|i| {
            MerkleIntervalTreeLeafNode::new(
                U256::from(i * 100),
                U256::from(i * 100 + 100),
                i.to_be_bytes().to_vec(),
            )
        })
        .collect();
    leaves.shuffle(&mut rand::thread_rng());
    leaves
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_build");
    for count in [16u64, 256, 4096] {
        let input = leaves(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| MerkleIntervalTree::new(black_box(input.clone())))
        });
    }
    group.finish();
}

fn bench_prove_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_prove_verify");
    for count in [16u64, 256, 4096] {
        let Ok(tree) = MerkleIntervalTree::new(leaves(count)) else {
            continue;
        };
        let Some(root) = tree.root_hash() else {
            continue;
        };
        let position = tree.len() / 2;
        let leaf = tree.leaves()[position].clone();

        group.bench_with_input(BenchmarkId::new("prove", count), &position, |b, &position| {
            b.iter(|| tree.inclusion_proof(black_box(position)))
        });

        let Ok(proof) = tree.inclusion_proof(position) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("verify", count), &proof, |b, proof| {
            b.iter(|| {
                MerkleIntervalTree::check_inclusion_proof(
                    black_box(&leaf),
                    position,
                    black_box(proof),
                    &root,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_prove_and_verify);
criterion_main!(benches);
