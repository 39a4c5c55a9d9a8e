// Matcher and dosage-scaling benchmarks over synthetic catalogs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use organix_core::{dosage, Query, Record, RecommendationEngine};
use rand::prelude::*;
use rand::rngs::StdRng;

const CHEMICALS: &[&str] = &[
    "glyphosate", "urea", "chlorpyrifos", "imidacloprid", "carbofuran", "mancozeb",
    "atrazine", "paraquat", "cypermethrin", "dap", "monocrotophos", "acephate",
];

const CROPS: &[&str] = &[
    "wheat", "rice", "cotton", "mustard", "maize", "potato", "tomato", "sugarcane",
    "soybean", "chilli", "onion", "groundnut",
];

fn generate_records(n: usize, rng: &mut StdRng) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let chemical = CHEMICALS[rng.random_range(0..CHEMICALS.len())];
            let crop = CROPS[rng.random_range(0..CROPS.len())];
            Record {
                chemical: format!("{} {}", chemical, i),
                crop: crop.to_string(),
                problem_or_pest: "pests".to_string(),
                organic_alternative: format!("alternative {}", i),
                dosage: format!("{} kg/acre", rng.random_range(1..20)),
                application_time: "morning".to_string(),
                safety_note: "gloves".to_string(),
            }
        })
        .collect()
}

fn benchmark_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [100, 1000, 5000].iter() {
        let engine = RecommendationEngine::from_records(generate_records(*size, &mut rng)).unwrap();
        group.bench_with_input(BenchmarkId::new("best_match", size), size, |b, _| {
            let matcher = engine.matcher();
            b.iter(|| black_box(matcher.best_match(black_box("mancozeb potato"))));
        });
    }

    group.finish();
}

fn benchmark_resolve(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let engine = RecommendationEngine::from_records(generate_records(1000, &mut rng)).unwrap();
    let query = Query::new("atrazine", "maize", 3.5).unwrap();

    c.bench_function("resolve_1000", |b| {
        b.iter(|| black_box(engine.resolve(black_box(&query)).ok()));
    });
}

fn benchmark_dosage(c: &mut Criterion) {
    c.bench_function("dosage_scale", |b| {
        b.iter(|| black_box(dosage::scale(black_box("1.5 tonnes per acre"), black_box(12.0))));
    });
}

criterion_group!(benches, benchmark_match, benchmark_resolve, benchmark_dosage);
criterion_main!(benches);
