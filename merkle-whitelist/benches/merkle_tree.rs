use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use itertools::Itertools;
use merkle_whitelist::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_addresses(num_addresses: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..num_addresses)
        .map(|_| format!("0x{}", hex::encode(rng.random::<[u8; 20]>())))
        .collect_vec()
}

fn merkle_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_tree");
    group.sample_size(10);

    for num_addresses in [500, 5_000, 50_000] {
        let addresses = random_addresses(num_addresses);
        group.bench_with_input(
            BenchmarkId::new("build", num_addresses),
            &addresses,
            |bencher, addresses| {
                bencher.iter(|| MerkleTree::<Keccak256>::build(addresses).unwrap());
            },
        );
    }
}

criterion_group!(benches, merkle_tree);
criterion_main!(benches);
