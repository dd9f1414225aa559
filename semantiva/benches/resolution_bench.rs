//! Benchmarks for component resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use semantiva::context::{Context, ContextCollectionType, ContextObserver};
use semantiva::operations::OperationDescriptorCompiler;
use semantiva::registry::ComponentRegistry;
use semantiva::testing::{manifest_json, write_manifest};
use serde_json::json;
use std::sync::Arc;

fn resolution_benchmark(c: &mut Criterion) {
    let registry = Arc::new(ComponentRegistry::new());

    c.bench_function("get_class_builtin", |b| {
        b.iter(|| registry.get_class(black_box("ContextPassthrough")))
    });

    let compiler = OperationDescriptorCompiler::new(Arc::clone(&registry));
    c.bench_function("compile_rename_descriptor", |b| {
        b.iter(|| compiler.resolve(black_box("rename:gain:raw_gain")))
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let doc = manifest_json(&[("Drop", json!([{ "op": "delete", "key": "tmp" }]))]);
    let path = write_manifest(dir.path(), "ops.json", &doc).expect("manifest");
    let file_registry = ComponentRegistry::empty();
    file_registry.register_paths(&path).expect("register");

    c.bench_function("get_class_from_file", |b| {
        b.iter(|| file_registry.get_class(black_box("Drop")))
    });
}

fn rename_benchmark(c: &mut Criterion) {
    let compiler = OperationDescriptorCompiler::new(Arc::new(ComponentRegistry::empty()));
    let rename = compiler.resolve("rename:a:b").expect("descriptor");

    c.bench_function("rename_collection_64", |b| {
        b.iter_batched(
            || {
                let mut collection = ContextCollectionType::with_len(64);
                collection.set_value("a", json!(1));
                for index in 0..64 {
                    collection
                        .set_item_value(index, "a", json!(index))
                        .expect("slice");
                }
                Context::from(collection)
            },
            |mut ctx| {
                rename
                    .instantiate()
                    .process(&mut ContextObserver::new(&mut ctx))
                    .expect("rename");
                ctx
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, resolution_benchmark, rename_benchmark);
criterion_main!(benches);
