// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use interlinea::history::{History, DEFAULT_CAPACITY};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name: `history`
// - Case IDs: `save_60/<fixture>`, `undo_redo_50/<fixture>`.
fn benches_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    for case in [fixtures::Case::Small, fixtures::Case::Medium, fixtures::Case::Large] {
        let document = fixtures::document(case);

        group.throughput(Throughput::Elements(60));
        group.bench_function(format!("save_60/{}", case.id()), |b| {
            b.iter(|| {
                let mut history = History::default();
                for _ in 0..60 {
                    history.save(black_box(&document));
                }
                black_box(history.len())
            })
        });

        let mut filled = History::default();
        for _ in 0..DEFAULT_CAPACITY {
            filled.save(&document);
        }
        group.throughput(Throughput::Elements(2 * DEFAULT_CAPACITY as u64));
        group.bench_function(format!("undo_redo_50/{}", case.id()), |b| {
            b.iter_batched(
                || filled.clone(),
                |mut history| {
                    let mut live = document.clone();
                    while let Some(previous) = history.undo(&live) {
                        live = previous;
                    }
                    while let Some(next) = history.redo() {
                        live = next;
                    }
                    black_box(live.groups().len())
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_history
}
criterion_main!(benches);
