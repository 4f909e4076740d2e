// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use windrow_paging::{FieldValue, Pager, Query, SearchRecord, filter_indices};

struct Ticket {
    title: String,
    customer: String,
    id: i64,
    completed: bool,
}

impl SearchRecord for Ticket {
    fn searchable_fields(&self, visit: &mut dyn FnMut(FieldValue<'_>)) {
        visit(FieldValue::Text(&self.title));
        visit(FieldValue::Text(&self.customer));
        visit(FieldValue::Int(self.id));
        visit(FieldValue::Bool(self.completed));
    }
}

const TITLES: &[&str] = &[
    "Screen replacement",
    "Battery swap",
    "Keyboard repair",
    "Water damage triage",
    "Data recovery",
];

const CUSTOMERS: &[&str] = &[
    "Ann Aldrin", "Bob Breck", "Cara Chen", "Dev Dutta", "Elio Eva", "Faye Finch",
];

fn tickets(n: usize) -> Vec<Ticket> {
    (0..n)
        .map(|i| Ticket {
            title: TITLES[i % TITLES.len()].to_owned(),
            customer: CUSTOMERS[i % CUSTOMERS.len()].to_owned(),
            id: i as i64,
            completed: i % 3 == 0,
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("windrow_paging");
    group.sample_size(50);

    for &n in &[1_000_usize, 50_000] {
        let data = tickets(n);
        group.throughput(Throughput::Elements(n as u64));

        // A selective query: one of five titles matches.
        group.bench_function(format!("filter_selective(n={n})"), |b| {
            let query = Query::new("screen");
            b.iter(|| black_box(filter_indices(&data, &query)));
        });

        // A miss has to visit every field of every record.
        group.bench_function(format!("filter_miss(n={n})"), |b| {
            let query = Query::new("zzzzzz");
            b.iter(|| black_box(filter_indices(&data, &query)));
        });

        // The empty query short-circuits to the identity ordering.
        group.bench_function(format!("filter_identity(n={n})"), |b| {
            let query = Query::new("");
            b.iter(|| black_box(filter_indices(&data, &query)));
        });

        // The full table pipeline: filter, clamp, slice one page.
        group.bench_function(format!("paginate(n={n})"), |b| {
            b.iter(|| {
                let mut pager = Pager::new(25);
                pager.set_search("ann");
                pager.set_total_items(n);
                pager.set_page(3);
                black_box(pager.paginate(&data));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
