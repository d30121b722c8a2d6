//! Pipeline benchmark: form parse → validate → encode → stand-in model → level.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cvd_risk::features::{FeatureEncoder, FeatureVector, Preprocessing, MODEL_FEATURES};
use cvd_risk::form::{HealthRecord, InputRecord};
use cvd_risk::model::{ModelError, RiskModel};
use cvd_risk::pipeline::RiskPredictor;
use std::collections::HashMap;

struct Constant;

impl RiskModel for Constant {
    fn predict(&self, _: &FeatureVector) -> Result<f32, ModelError> {
        Ok(0.42)
    }
}

fn bench_form_to_assessment(c: &mut Criterion) {
    let form: HashMap<String, String> = InputRecord::from(HealthRecord::default())
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let encoder = FeatureEncoder::new(&MODEL_FEATURES, Preprocessing::PerRequest).unwrap();
    let predictor = RiskPredictor::new(encoder, Constant);

    c.bench_function("form_to_assessment", |b| {
        b.iter(|| {
            let record = InputRecord::from_form(black_box(&form)).unwrap();
            black_box(predictor.predict_risk(&record).unwrap())
        })
    });
}

criterion_group!(benches, bench_form_to_assessment);
criterion_main!(benches);
