// Matching benchmarks: per-request index build + search, and the full pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use vibematch_core::{
    normalize, Candidate, CandidatePool, LexicalKeywordExtractor, MatchConfig, MatchOrchestrator,
    ProfileStore, SimilarityIndex, UserProfile, Vector,
};
use vibematch_storage::MemoryStorage;

const DIM: usize = 384;

fn generate_random_vector(dim: usize) -> Vector {
    let mut rng = rand::rng();
    let data: Vec<f32> = (0..dim).map(|_| rng.random_range(-1.0f32..1.0f32)).collect();
    Vector::new(data)
}

fn generate_pool(size: usize) -> CandidatePool {
    CandidatePool::new(
        (0..size)
            .map(|i| Candidate {
                user_id: format!("user{}", i).into(),
                vector: normalize(&generate_random_vector(DIM)),
                transcript: String::new(),
                keywords: BTreeSet::new(),
            })
            .collect(),
    )
}

fn benchmark_index_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_search");
    let query = normalize(&generate_random_vector(DIM));

    for size in [100, 1000, 10000].iter() {
        let pool = generate_pool(*size);
        group.bench_with_input(BenchmarkId::new("build_and_search", size), size, |b, _| {
            b.iter(|| {
                let index = SimilarityIndex::build(black_box(pool.clone())).unwrap().unwrap();
                black_box(index.search(&query).unwrap().map(|hit| hit.score));
            });
        });
    }

    group.finish();
}

fn benchmark_find_best_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_match");

    let storage = Arc::new(MemoryStorage::new());
    storage
        .upsert_profile(
            UserProfile::new("requester", "M", "I love hiking and cooking")
                .with_embedding(generate_random_vector(DIM)),
        )
        .unwrap();
    for i in 0..1000 {
        storage
            .upsert_profile(
                UserProfile::new(format!("cand{}", i), "F", format!("I enjoy hiking trail number {}", i))
                    .with_embedding(generate_random_vector(DIM)),
            )
            .unwrap();
    }

    let matcher = MatchOrchestrator::new(
        storage.clone(),
        storage.clone(),
        Arc::new(LexicalKeywordExtractor::new()),
        &MatchConfig::default(),
    )
    .unwrap();

    group.bench_function("memory_1000", |b| {
        b.iter(|| {
            let result = matcher.find_best_match(&"requester".into(), &"F".into()).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_index_search, benchmark_find_best_match);
criterion_main!(benches);
