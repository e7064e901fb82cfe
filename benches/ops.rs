// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use interlinea::model::{GroupId, LineId, WordClass};
use interlinea::ops::{apply_ops, ApplyResult, Op};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name: `ops.apply`
// - Case IDs: `remove_groups_<n>/<fixture>`, `remove_line/<fixture>`.
fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.applied as u64);
    acc = acc.wrapping_mul(131).wrapping_add(result.delta.added.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(result.delta.updated.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(result.delta.removed.len() as u64);
    acc
}

fn remove_group_ops(count: usize) -> Vec<Op> {
    (0..count)
        .map(|line| Op::RemoveGroup {
            group_id: GroupId::new(format!("g{line:04}-fr-0")).expect("group id"),
        })
        .collect()
}

fn benches_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");
    let class = WordClass::default();

    for case in [fixtures::Case::Small, fixtures::Case::Medium] {
        let template = fixtures::document(case);
        let ops = remove_group_ops(template.connectors().len());

        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(format!("remove_groups_{}/{}", ops.len(), case.id()), |b| {
            b.iter_batched(
                || template.clone(),
                |mut document| {
                    let result =
                        apply_ops(&mut document, black_box(&ops), &class).expect("apply_ops");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });

        let remove_line = [Op::RemoveLine { line_id: LineId::new("l0001").expect("line id") }];
        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("remove_line/{}", case.id()), |b| {
            b.iter_batched(
                || template.clone(),
                |mut document| {
                    let result = apply_ops(&mut document, black_box(&remove_line), &class)
                        .expect("apply_ops");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_ops
}
criterion_main!(benches);
