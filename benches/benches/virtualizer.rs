// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use windrow_virtualizer::Virtualizer;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

fn build_virtualizer(count: usize, measured: bool) -> Virtualizer {
    let mut virt = Virtualizer::new(count, 50.0);
    virt.set_viewport_extent(Some(800.0));
    if measured {
        let mut rng = Lcg::new(0x5EED_0000_0000_0001);
        for index in 0..count {
            // Row heights between 20 and 148 logical pixels.
            let size = 20.0 + f64::from(rng.next_u32() % 128);
            virt.measure(index, size);
        }
    }
    virt
}

fn bench_virtualizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("windrow_virtualizer");
    group.sample_size(50);

    for &count in &[1_000_usize, 100_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(format!("visible_range_uniform(n={count})"), |b| {
            b.iter_batched(
                || build_virtualizer(count, false),
                |mut virt| {
                    virt.on_scroll(count as f64 * 25.0, 0);
                    black_box(virt.visible_range());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("visible_range_measured(n={count})"), |b| {
            b.iter_batched(
                || {
                    let mut virt = build_virtualizer(count, true);
                    // Realize the prefix sums once so the measurement only
                    // sees the binary search.
                    let _ = virt.total_size();
                    virt.on_scroll(virt.total_size() / 2.0, 0);
                    virt
                },
                |mut virt| {
                    black_box(virt.visible_range());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("virtual_items_measured(n={count})"), |b| {
            b.iter_batched(
                || {
                    let mut virt = build_virtualizer(count, true);
                    let _ = virt.total_size();
                    virt.on_scroll(virt.total_size() / 2.0, 0);
                    virt
                },
                |mut virt| {
                    black_box(virt.virtual_items());
                },
                BatchSize::SmallInput,
            );
        });

        // A scroll burst with interleaved measurement, the worst case for
        // the prefix-sum watermark.
        group.bench_function(format!("scroll_and_measure(n={count})"), |b| {
            b.iter_batched(
                || build_virtualizer(count, false),
                |mut virt| {
                    let mut rng = Lcg::new(0x5C20_0000_0000_0002);
                    for step in 0..64_u64 {
                        virt.on_scroll(f64::from(rng.next_u32() % 50_000), step * 16);
                        let items = virt.virtual_items();
                        for item in &items {
                            virt.measure(item.index, item.size + 1.0);
                        }
                        black_box(items);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_virtualizer);
criterion_main!(benches);
