use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use leitner_core::clock::ManualClock;
use leitner_core::storage::MemoryStorage;
use leitner_core::{BoxIndex, CardStore, ALL_CATEGORIES};

fn seeded_store(n: usize) -> CardStore {
    let mut store = CardStore::open(MemoryStorage::new(), ManualClock::new(Utc::now()));
    let categories = ["linux", "git", "docker", "kubectl"];
    for i in 0..n {
        let category = categories[i % categories.len()];
        let question = format!("question {i}");
        store
            .add_card(&question, &format!("answer {i}"), Some(category))
            .unwrap();
        store.move_card(&question, (i % 5) as i64).unwrap();
    }
    store
}

fn bench_box_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_queries");
    let mut store = seeded_store(1000);
    let box_two = BoxIndex::new(2).unwrap();

    group.bench_function("by_box", |b| {
        b.iter(|| store.get_cards_by_box(black_box(box_two)).unwrap())
    });

    group.bench_function("by_box_and_category", |b| {
        b.iter(|| {
            store
                .get_cards_by_box_and_category(black_box(box_two), black_box("git"))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let store = seeded_store(1000);

    group.bench_function("keyword", |b| {
        b.iter(|| store.search_cards(black_box("ANSWER 99"), black_box(Some(ALL_CATEGORIES))))
    });

    group.bench_function("keyword_and_category", |b| {
        b.iter(|| store.search_cards(black_box("question"), black_box(Some("docker"))))
    });

    group.finish();
}

criterion_group!(benches, bench_box_queries, bench_search);
criterion_main!(benches);
