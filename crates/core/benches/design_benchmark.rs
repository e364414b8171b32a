//! Benchmarks pour le moteur de design

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rnai_core::{
    scoring, seeded, ConstructType, DesignEngine, DesignParametersPatch, DesignRequest, EngineConfig,
};
use std::time::Duration;

fn random_target(len: usize, seed: u64) -> String {
    use rand::Rng;
    let mut rng = seeded(seed);
    (0..len).map(|_| ['A', 'C', 'G', 'T'][rng.gen_range(0..4)]).collect()
}

fn benchmark_design_runs(c: &mut Criterion) {
    let targets = vec![
        ("short", random_target(500, 1)),
        ("medium", random_target(2_000, 2)),
        ("long", random_target(10_000, 3)),
    ];

    let mut group = c.benchmark_group("Design Performance");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for (name, target) in &targets {
        for parallel in [false, true] {
            let engine = DesignEngine::new(EngineConfig {
                parallel,
                ..EngineConfig::default()
            });
            let request = DesignRequest {
                target_sequence: target.clone(),
                construct_type: ConstructType::Sirna,
                design_parameters: DesignParametersPatch::default(),
                max_designs: Some(10),
            };

            let label = if parallel { "parallel" } else { "serial" };
            group.bench_function(format!("design_{}_{}", name, label), |b| {
                b.iter(|| {
                    let _ = engine.design(black_box(&request), &mut seeded(42));
                });
            });
        }
    }

    group.finish();
}

fn benchmark_specificity(c: &mut Criterion) {
    let target = random_target(10_000, 7);
    let guide = target[4_000..4_021].to_string();

    c.bench_function("specificity_10kb", |b| {
        b.iter(|| scoring::specificity_score(black_box(&guide), black_box(&target)));
    });
}

criterion_group!(benches, benchmark_design_runs, benchmark_specificity);
criterion_main!(benches);
