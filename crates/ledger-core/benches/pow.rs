use criterion::{criterion_group, criterion_main, Criterion};
use ledger_core::{find_proof, mine::find_proof_parallel, Difficulty};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_pow(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let inputs: Vec<(u64, String)> = (0..8)
        .map(|_| (rng.gen(), hex_hash(&mut rng)))
        .collect();
    let difficulty = Difficulty::default();

    c.bench_function("find_proof_difficulty_3", |b| {
        b.iter(|| {
            for (last_proof, prev_hash) in &inputs {
                let _proof = find_proof(*last_proof, prev_hash, difficulty);
            }
        });
    });

    c.bench_function("find_proof_parallel_difficulty_3", |b| {
        b.iter(|| {
            for (last_proof, prev_hash) in &inputs {
                let _proof = find_proof_parallel(*last_proof, prev_hash, difficulty);
            }
        });
    });
}

fn hex_hash(rng: &mut StdRng) -> String {
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}

criterion_group!(benches, bench_pow);
criterion_main!(benches);
