// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok())
}

/// Shared criterion settings. Flamegraphs are only collected when
/// `INTERLINEA_PROFILE_FREQ` is set.
pub fn criterion() -> Criterion {
    let sample_size = env_parse("INTERLINEA_BENCH_SAMPLES").unwrap_or(50usize).clamp(10, 200);
    let warmup_secs = env_parse("INTERLINEA_BENCH_WARMUP_SECS").unwrap_or(2u64).clamp(1, 60);
    let measure_secs = env_parse("INTERLINEA_BENCH_MEASURE_SECS").unwrap_or(4u64).clamp(1, 120);

    let criterion = Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measure_secs));

    match env_parse::<i32>("INTERLINEA_PROFILE_FREQ") {
        Some(frequency) => criterion.with_profiler(PProfProfiler::new(
            frequency.clamp(1, 1000),
            Output::Flamegraph(None),
        )),
        None => criterion,
    }
}
