//! Benchmarks for path resolution and validation.
//!
//! Tests performance of:
//! - Dotted path resolution through nested complex properties
//! - Accessor expression parsing
//! - Validator tree construction (uncached)
//! - Validation of a single entity and of a batch (cached trees)

extern crate entityscope;

use criterion::{criterion_group, criterion_main, Criterion};
use entityscope::prelude::*;
use std::{hint::black_box, sync::Arc};

/// Journey entity with two `Stop` complex properties, each holding a `Place`.
fn journey_model() -> Arc<Model> {
    let model = Model::new();

    TypeBuilder::new("Journey")
        .property("JourneyId", ClrType::Primitive(PrimitiveKind::Int64))
        .property("Code", ClrType::String)
        .attribute(ValidationAttribute::regular_expression("^[A-Z]{2}[0-9]{4}$"))
        .property("From", ClrType::Class("Stop".to_string()))
        .property("To", ClrType::Class("Stop".to_string()))
        .register(model.types());
    TypeBuilder::new("Stop")
        .property("Place", ClrType::Class("Place".to_string()))
        .property("Platform", ClrType::String)
        .attribute(ValidationAttribute::string_length(4))
        .register(model.types());
    TypeBuilder::new("Place")
        .property("Name", ClrType::String)
        .attribute(ValidationAttribute::required())
        .property("Country", ClrType::String)
        .register(model.types());

    model.add_structural_type(
        StructuralType::entity("Journey")
            .with_property(
                EdmProperty::scalar("JourneyId")
                    .required()
                    .store_generated(StoreGeneratedPattern::Identity),
            )
            .with_property(EdmProperty::scalar("Code").required().max_length(6))
            .with_property(EdmProperty::complex("From", "Stop"))
            .with_property(EdmProperty::complex("To", "Stop")),
    );
    model.add_structural_type(
        StructuralType::complex("Stop")
            .with_property(EdmProperty::complex("Place", "Place"))
            .with_property(EdmProperty::scalar("Platform")),
    );
    model.add_structural_type(
        StructuralType::complex("Place")
            .with_property(EdmProperty::scalar("Name"))
            .with_property(EdmProperty::scalar("Country").max_length(2)),
    );

    Arc::new(model)
}

fn stop(name: &str, country: &str) -> InstanceRc {
    Instance::new("Stop").with("Platform", "7B").with(
        "Place",
        Instance::new("Place")
            .with("Name", name)
            .with("Country", country),
    )
}

fn journey_entry(model: &Arc<Model>) -> EntityEntry {
    let journey = Instance::new("Journey")
        .with("JourneyId", 1_i64)
        .with("Code", "EC0042")
        .with("From", stop("Zurich", "CH"))
        .with("To", stop("Milan", "IT"));

    let provider: Arc<dyn MetadataProvider> = model.clone();
    EntityEntry::new(provider, journey).unwrap()
}

/// Benchmark resolving a three-segment property path.
fn bench_resolve_dotted_path(c: &mut Criterion) {
    let entry = journey_entry(&journey_model());

    c.bench_function("resolve_dotted_path", |b| {
        b.iter(|| {
            let property = entry.property(black_box("From.Place.Country")).unwrap();
            black_box(property)
        });
    });
}

/// Benchmark resolving an accessor expression.
/// Expression: j => j.To.Place.Name
fn bench_resolve_expression(c: &mut Criterion) {
    let entry = journey_entry(&journey_model());
    let selector = PathExpression::lambda(
        "j",
        PathExpression::parameter("j")
            .member("To")
            .member("Place")
            .member("Name"),
    );

    c.bench_function("resolve_expression", |b| {
        b.iter(|| {
            let property = entry.property_from_expression(black_box(&selector)).unwrap();
            black_box(property)
        });
    });
}

/// Benchmark building the validator tree without the provider cache.
fn bench_build_validator(c: &mut Criterion) {
    let entry = journey_entry(&journey_model());
    let builder = EntityValidatorBuilder::new(ValidationConfig::default());

    c.bench_function("build_entity_validator", |b| {
        b.iter(|| {
            let validator = builder.build_entity_validator(black_box(&entry)).unwrap();
            black_box(validator)
        });
    });
}

/// Benchmark validating a valid entity with a cached tree.
fn bench_validate_entity(c: &mut Criterion) {
    let entry = journey_entry(&journey_model());
    let provider = ValidationProvider::new(ValidationConfig::default());
    provider.validate(&entry).unwrap();

    c.bench_function("validate_entity", |b| {
        b.iter(|| {
            let result = provider.validate(black_box(&entry)).unwrap();
            black_box(result)
        });
    });
}

/// Benchmark validating an entity with errors at several depths.
fn bench_validate_invalid_entity(c: &mut Criterion) {
    let entry = journey_entry(&journey_model());
    entry.set_current_value("Code", "ec-42");
    entry
        .property("To.Place.Country")
        .unwrap()
        .set_current_value("ITA")
        .unwrap();
    let provider = ValidationProvider::new(ValidationConfig::default());

    c.bench_function("validate_invalid_entity", |b| {
        b.iter(|| {
            let result = provider.validate(black_box(&entry)).unwrap();
            black_box(result)
        });
    });
}

/// Benchmark validating 1000 entities in parallel.
fn bench_validate_entries(c: &mut Criterion) {
    let model = journey_model();
    let entries: Vec<_> = (0..1000).map(|_| journey_entry(&model)).collect();
    let provider = ValidationProvider::new(ValidationConfig::default());

    c.bench_function("validate_entries_1000", |b| {
        b.iter(|| {
            let results = provider.validate_entries(black_box(&entries)).unwrap();
            black_box(results)
        });
    });
}

criterion_group!(
    benches,
    // Path resolution
    bench_resolve_dotted_path,
    bench_resolve_expression,
    // Validation
    bench_build_validator,
    bench_validate_entity,
    bench_validate_invalid_entity,
    bench_validate_entries,
);
criterion_main!(benches);
