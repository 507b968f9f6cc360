//! Benchmarks for the filter engine and list views
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use symptrack::filter::{derive, FilterSpec, Ordering};
use symptrack::models::{by_rating_then_distance, Alert, Hospital, ALERT_TYPES};
use symptrack::view::ListView;
use symptrack::Severity;

fn create_alerts(count: usize) -> Vec<Alert> {
    (0..count)
        .map(|i| Alert {
            id: i.to_string(),
            alert_type: ALERT_TYPES[i % ALERT_TYPES.len()].to_string(),
            severity: Severity::ALL[i % Severity::ALL.len()],
            title: format!("Alert {} in district {}", i, i % 17),
            description: if i % 7 == 0 {
                "Seasonal influenza cases rising".to_string()
            } else {
                "Air quality advisory".to_string()
            },
            location: Some(format!("Zone {}", i % 5)),
            distance: Some((i % 30) as f64),
            created_at: None,
            affected_count: Some(i as u64),
            source: None,
        })
        .collect()
}

fn create_hospitals(count: usize) -> Vec<Hospital> {
    (0..count)
        .map(|i| Hospital {
            id: i.to_string(),
            name: format!("Hospital {}", i),
            address: format!("{} Main St", i),
            rating: Some((i % 50) as f64 / 10.0),
            distance: Some((i % 23) as f64 * 0.7),
            types: Some("hospital,health".to_string()),
            ..Default::default()
        })
        .collect()
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");

    for size in [100, 1000, 10000] {
        let alerts = create_alerts(size);
        group.throughput(Throughput::Elements(size as u64));

        let empty = FilterSpec::new();
        group.bench_function(format!("empty_{}", size), |b| {
            b.iter(|| derive(black_box(&alerts), &empty, None))
        });

        let field = FilterSpec::new().with("type", "Environmental").with("severity", "High");
        group.bench_function(format!("fields_{}", size), |b| {
            b.iter(|| derive(black_box(&alerts), &field, None))
        });

        let search = FilterSpec::new().search("influenza");
        group.bench_function(format!("search_{}", size), |b| {
            b.iter(|| derive(black_box(&alerts), &search, None))
        });
    }

    group.finish();
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");
    let hospitals = create_hospitals(1000);
    let order: Ordering<Hospital> = by_rating_then_distance;

    group.bench_function("rating_then_distance_1000", |b| {
        b.iter(|| derive(black_box(&hospitals), &FilterSpec::new(), Some(order)))
    });

    group.finish();
}

fn bench_list_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_view");
    let alerts = create_alerts(1000);

    group.bench_function("filter_changes_1000", |b| {
        let mut view = ListView::new();
        view.set_source(alerts.clone());
        b.iter(|| {
            view.set_filter("severity", "Critical");
            view.set_search("district 3");
            view.clear_filters();
            black_box(view.visible().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_derive, bench_ordering, bench_list_view);
criterion_main!(benches);
