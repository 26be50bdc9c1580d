use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deepcfg::coerce::convert;
use deepcfg::logging::RecordingNotifier;
use deepcfg::schema::builtin;
use deepcfg::template::sample_config;
use deepcfg::{DType, Namespace, SchemaValidator, Value};

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    // Already typed, the common case
    group.bench_function("int_passthrough", |b| {
        let raw = Value::from(10);
        b.iter(|| convert(black_box(&raw), Some(&DType::Int), &Value::from(1), "a"));
    });

    group.bench_function("str_to_int", |b| {
        let raw = Value::from("10");
        b.iter(|| convert(black_box(&raw), Some(&DType::Int), &Value::from(1), "a"));
    });

    for len in [4usize, 64, 1024] {
        let raw = Value::List((0..len).map(|i| Value::from(i.to_string())).collect());
        let dtype = DType::list(DType::Int);
        group.bench_with_input(BenchmarkId::new("str_list_to_int", len), &raw, |b, raw| {
            b.iter(|| convert(black_box(raw), Some(&dtype), &Value::Null, "a"));
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let schema = builtin();
    let notifier = RecordingNotifier::new();

    // Full default tree built from nothing
    group.bench_function("empty_config", |b| {
        b.iter(|| {
            let mut live = Namespace::new();
            SchemaValidator::new(&notifier)
                .validate(schema.root(), &mut live, &[] as &[&str])
                .unwrap();
            notifier.clear();
            live
        });
    });

    // Second pass over a complete configuration
    let complete = sample_config(&schema);
    group.bench_function("complete_config", |b| {
        b.iter(|| {
            let mut live = complete.copy();
            SchemaValidator::new(&notifier)
                .validate(schema.root(), black_box(&mut live), &[] as &[&str])
                .unwrap();
            live
        });
    });

    // Wildcard sections with many user-named children
    for children in [1usize, 16, 256] {
        let mut live = complete.copy();
        let losses: Namespace = (0..children)
            .map(|i| (format!("loss_{i}"), Value::empty_map()))
            .collect();
        live.set(&["losses"], losses).unwrap();
        group.bench_with_input(BenchmarkId::new("wildcard_children", children), &live, |b, live| {
            b.iter(|| {
                let mut live = live.copy();
                SchemaValidator::new(&notifier)
                    .validate(schema.root(), &mut live, &[] as &[&str])
                    .unwrap();
                notifier.clear();
                live
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_validate);
criterion_main!(benches);
