//! # Ledger Proof Benchmarks
//!
//! | Stage | Cost driver |
//! |-------|-------------|
//! | Root recomputation | path depth × SHA-256 |
//! | Membership resolution | one key path hash |
//! | Chain verification | links × BLS aggregate verify |
//! | Decode | proof size |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ledger_proof::{
    recompute_root, BlsRosterVerifier, MockSignatureVerifier, Proof, ProofVerifierConfig,
    MAX_PATH_DEPTH,
};
use ledger_proof_tests::fixtures::{chain_to, keypairs, ReferenceTrie, TestChain};
use std::time::Duration;

fn populated_trie(n: usize) -> ReferenceTrie {
    let mut trie = ReferenceTrie::new();
    for i in 0..n {
        let key = format!("instance-{}", i);
        trie.insert(key.as_bytes(), &[&(i as u64).to_le_bytes(), b"coin", b"darc"]);
    }
    trie
}

fn bench_inclusion_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("inclusion-path");

    for size in [16usize, 1_024, 16_384] {
        let trie = populated_trie(size);
        let path = trie.prove(b"instance-7");

        group.bench_with_input(BenchmarkId::new("recompute_root", size), &path, |b, path| {
            b.iter(|| black_box(recompute_root(path, MAX_PATH_DEPTH)))
        });
        group.bench_with_input(BenchmarkId::new("resolve_membership", size), &path, |b, path| {
            b.iter(|| black_box(ledger_proof::resolve_membership(path).is_ok()))
        });
    }

    group.finish();
}

fn bench_forward_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward-links");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let trie = populated_trie(64);
    for links in [1usize, 8, 32] {
        let chain = chain_to(trie.root(), links);
        let proof = chain.proof(&trie, b"instance-3");
        let anchor = chain.anchor();

        group.bench_with_input(BenchmarkId::new("bls", links), &proof, |b, proof| {
            b.iter(|| black_box(proof.verify_chain(&anchor, &BlsRosterVerifier::new()).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("mock", links), &proof, |b, proof| {
            let mock = MockSignatureVerifier::accepting();
            b.iter(|| black_box(proof.verify_chain(&anchor, &mock).is_ok()))
        });
    }

    // Roster size drives aggregation cost
    for members in [4u8, 16, 64] {
        let mut chain = TestChain::genesis(keypairs(1, members));
        chain.append(trie.root());
        let proof = chain.proof(&trie, b"instance-3");
        let anchor = chain.anchor();
        group.bench_with_input(BenchmarkId::new("roster", members), &proof, |b, proof| {
            b.iter(|| black_box(proof.verify_chain(&anchor, &BlsRosterVerifier::new()).is_ok()))
        });
    }

    group.finish();
}

fn bench_decode_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("proof");
    let trie = populated_trie(1_024);
    let chain = chain_to(trie.root(), 4);
    let bytes = chain.proof(&trie, b"instance-11").to_bytes().unwrap_or_default();
    let config = ProofVerifierConfig::default();
    let anchor = chain.anchor();

    group.bench_function("decode", |b| {
        b.iter(|| black_box(Proof::from_bytes(&bytes, &config).is_ok()))
    });
    group.bench_function("decode_and_verify", |b| {
        b.iter(|| {
            let proof = Proof::from_bytes(&bytes, &config).ok();
            black_box(proof.map(|p| p.is_valid(&anchor)))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inclusion_path,
    bench_forward_links,
    bench_decode_and_verify
);
criterion_main!(benches);
