use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use leitner_core::clock::ManualClock;
use leitner_core::scheduler::{box_status, format_remaining, is_due, is_due_at};
use leitner_core::storage::MemoryStorage;
use leitner_core::traits::Clock;
use leitner_core::{BoxIndex, CardStore};

fn bench_is_due(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_due");
    let now = Utc::now();
    let last = now - Duration::hours(3);

    group.bench_function("typed", |b| {
        b.iter(|| is_due(black_box(last), black_box(BoxIndex::LAST), black_box(now)))
    });

    group.bench_function("rfc3339", |b| {
        b.iter(|| is_due_at(black_box("2024-05-01T09:00:00Z"), black_box(2), black_box(now)))
    });

    group.bench_function("naive_iso", |b| {
        b.iter(|| is_due_at(black_box("2024-05-01T09:00:00.123456"), black_box(2), black_box(now)))
    });

    group.finish();
}

fn bench_box_status(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_status");
    let clock = ManualClock::new(Utc::now());
    let mut store = CardStore::open(MemoryStorage::new(), clock.clone());
    for i in 0..500 {
        store
            .add_card(&format!("question {i}"), &format!("answer {i}"), None)
            .unwrap();
        clock.advance(Duration::seconds(1));
    }
    let cards = store.get_cards_by_box(BoxIndex::FIRST).unwrap();
    let now = clock.now();

    group.bench_function("500_cards", |b| {
        b.iter(|| box_status(black_box(&cards), BoxIndex::FIRST, black_box(now)))
    });

    group.bench_function("format_remaining", |b| {
        b.iter(|| format_remaining(black_box(Duration::minutes(5000))))
    });

    group.finish();
}

criterion_group!(benches, bench_is_due, bench_box_status);
criterion_main!(benches);
