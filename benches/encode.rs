//! Encoding benchmark: input record → feature vector, both preprocessing modes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cvd_risk::features::{FeatureEncoder, FittedPreprocessing, Preprocessing, MODEL_FEATURES};
use cvd_risk::form::{lookup, FieldKind, HealthRecord, InputRecord};
use std::collections::BTreeMap;

fn fitted() -> FittedPreprocessing {
    let mut vocabularies = BTreeMap::new();
    for name in MODEL_FEATURES {
        if let Some(FieldKind::Choice(options)) = lookup(name).map(|f| f.kind) {
            let mut classes: Vec<String> = options.iter().map(|o| o.to_string()).collect();
            classes.sort();
            vocabularies.insert(name.to_string(), classes);
        }
    }
    FittedPreprocessing {
        features: MODEL_FEATURES.iter().map(|f| f.to_string()).collect(),
        vocabularies,
        mean: vec![0.0; MODEL_FEATURES.len()],
        scale: vec![1.0; MODEL_FEATURES.len()],
    }
}

fn bench_encode(c: &mut Criterion) {
    let record = InputRecord::from(HealthRecord::default());
    let per_request = FeatureEncoder::new(&MODEL_FEATURES, Preprocessing::PerRequest).unwrap();
    let fitted = FeatureEncoder::new(&MODEL_FEATURES, Preprocessing::Fitted(fitted())).unwrap();

    let mut g = c.benchmark_group("encode");
    g.bench_function("per_request", |b| {
        b.iter(|| per_request.encode(black_box(&record), "bench").unwrap())
    });
    g.bench_function("fitted", |b| {
        b.iter(|| fitted.encode(black_box(&record), "bench").unwrap())
    });
    g.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
