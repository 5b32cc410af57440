use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{Mutation, PageDocument, SectionKey, ServiceKey};

fn large_document() -> PageDocument {
    let mut doc = PageDocument::seed();
    for i in 0..500 {
        doc = Mutation::AddService {
            service: ServiceKey::new(format!("service-{}", i)),
            title: format!("Service {}", i),
            description: "Generated for benchmarking".to_string(),
        }
        .reduce(&doc);
    }
    doc
}

fn reorder_section(c: &mut Criterion) {
    let doc = PageDocument::seed();
    let mutation = Mutation::ReorderSection {
        active: SectionKey::Services,
        over: SectionKey::Info,
    };

    c.bench_function("reorder_section", |b| {
        b.iter(|| mutation.apply(black_box(&doc)))
    });
}

fn toggle_service_large(c: &mut Criterion) {
    let doc = large_document();
    let mutation = Mutation::ToggleServiceVisibility {
        service: ServiceKey::new("service-250"),
    };

    c.bench_function("toggle_service_500", |b| {
        b.iter(|| mutation.apply(black_box(&doc)))
    });
}

fn reorder_service_large(c: &mut Criterion) {
    let doc = large_document();
    let mutation = Mutation::ReorderService {
        active: ServiceKey::new("service-499"),
        over: ServiceKey::new("appointments"),
    };

    c.bench_function("reorder_service_500", |b| {
        b.iter(|| mutation.apply(black_box(&doc)))
    });
}

fn compare_documents(c: &mut Criterion) {
    let doc = large_document();
    let edited = Mutation::EditServiceField {
        service: ServiceKey::new("service-10"),
        field: "title".to_string(),
        value: "Renamed".to_string(),
    }
    .reduce(&doc);

    // Dirty check after every dispatch compares whole documents
    c.bench_function("compare_documents_500", |b| {
        b.iter(|| black_box(&edited) == black_box(&doc))
    });
}

criterion_group!(
    benches,
    reorder_section,
    toggle_service_large,
    reorder_service_large,
    compare_documents
);
criterion_main!(benches);
