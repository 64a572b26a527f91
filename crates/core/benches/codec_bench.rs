//! Codec benchmarks
//!
//! Benchmarks cover direct encode/decode per variant, registry dispatch and
//! the cost of rejecting a malformed envelope.
//!
//! Run with: `cargo bench --bench codec_bench -p tempowire-core`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use tempowire_core::{
    CronExpression, CronExpressionCodec, Duration, DurationCodec, Envelope, RelativeOffset,
    RelativeOffsetCodec, TaggedRegistry, TemporalCodec, TemporalValue,
};

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn envelope(value: Value) -> Envelope {
    match value {
        Value::Object(map) => map,
        _ => Envelope::new(),
    }
}

fn sample_offset() -> RelativeOffset {
    RelativeOffset::new().with_day(1).with_hour(0).with_months(1).with_leapdays(1)
}

// -----------------------------------------------------------------------------
// Direct codec benchmarks
// -----------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let duration = Duration::new(12, 3600, 250);
    group.bench_function("time_delta", |b| {
        let codec = DurationCodec::default();
        b.iter(|| codec.encode(black_box(&duration)));
    });

    let offset = sample_offset();
    group.bench_function("relative_delta", |b| {
        let codec = RelativeOffsetCodec::default();
        b.iter(|| codec.encode(black_box(&offset)));
    });

    let cron = CronExpression::new("*/15 9-17 * * mon-fri");
    group.bench_function("cron_expression", |b| {
        let codec = CronExpressionCodec::default();
        b.iter(|| codec.encode(black_box(&cron)));
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let time_delta = envelope(json!({"__type": "TimeDelta", "days": 12, "seconds": 3600}));
    group.bench_function("time_delta", |b| {
        let codec = DurationCodec::default();
        b.iter(|| codec.decode(black_box(&time_delta)));
    });

    let partial = envelope(json!({"__type": "RelativeDelta", "days": 12, "seconds": 0}));
    let full = RelativeOffsetCodec::default().encode(&sample_offset());
    for (name, input) in [("partial", &partial), ("full", &full)] {
        group.bench_with_input(BenchmarkId::new("relative_delta", name), input, |b, input| {
            let codec = RelativeOffsetCodec::default();
            b.iter(|| codec.decode(black_box(input)));
        });
    }

    let cron = envelope(json!({"__type": "CronExpression", "value": "5 4 * * *"}));
    group.bench_function("cron_expression", |b| {
        let codec = CronExpressionCodec::default();
        b.iter(|| codec.decode(black_box(&cron)));
    });

    group.finish();
}

// -----------------------------------------------------------------------------
// Registry benchmarks
// -----------------------------------------------------------------------------

fn bench_registry(c: &mut Criterion) {
    let registry = TaggedRegistry::default();
    let mut group = c.benchmark_group("registry");

    let values = [
        TemporalValue::from(Duration::from_days(1)),
        TemporalValue::from(sample_offset()),
        TemporalValue::from(CronExpression::new("0 0 * * 0")),
    ];
    for value in &values {
        let encoded = registry.encode(value);
        group.bench_with_input(BenchmarkId::new("decode", value.kind()), &encoded, |b, input| {
            b.iter(|| registry.decode(black_box(input)));
        });
    }

    group.bench_function("resolve", |b| {
        b.iter(|| registry.resolve(black_box("RelativeDelta")));
    });

    let rejected = envelope(json!({"__type": "RelativeDelta", "weeks": 1, "month": "june"}));
    group.bench_function("reject_invalid", |b| {
        b.iter(|| registry.decode(black_box(&rejected)));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_registry);
criterion_main!(benches);
