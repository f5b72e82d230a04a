// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use proteus::engine::{merge, split};
use proteus::store::{DiagramDocument, DiagramFolder};

mod fixtures;
mod profiler;

use fixtures::{checksum_diagram, checksum_document, document, TempDir};

// Benchmark identity (keep stable):
// - Group names in this file: `engine.merge`, `engine.split`, `store.pair`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `small`, `large_no_overrides`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn benches_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.merge");

    for case in [
        document::Case::Small,
        document::Case::Medium,
        document::Case::LargeNoOverrides,
        document::Case::Large,
    ] {
        let (registry, timeline) = document::fixture(case);
        group.throughput(Throughput::Elements(case.params().nodes as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let diagram = merge(black_box(&registry), black_box(&timeline), None);
                black_box(checksum_diagram(&diagram))
            })
        });
    }

    // Merging a non-current snapshot goes through the same path plus the
    // timeline lookup; one large case keeps that cost visible.
    let (registry, timeline) = document::fixture(document::Case::Large);
    let last = document::snapshot_id(document::Case::Large.params().snapshots - 1);
    group.bench_function("large_by_id", |b| {
        b.iter(|| {
            let diagram = merge(black_box(&registry), black_box(&timeline), Some(&last));
            black_box(checksum_diagram(&diagram))
        })
    });

    group.finish();
}

fn benches_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.split");

    for case in [
        document::Case::Small,
        document::Case::Medium,
        document::Case::Large,
    ] {
        let (registry, timeline) = document::fixture(case);
        let diagram = merge(&registry, &timeline, None);
        group.throughput(Throughput::Elements(case.params().nodes as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let (registry_out, timeline_out) =
                    split(black_box(&diagram), black_box(&registry), black_box(&timeline));
                black_box(checksum_document(&registry_out, &timeline_out))
            })
        });
    }

    // Round trip: what one debounced auto-save costs end to end in memory.
    let (registry, timeline) = document::fixture(document::Case::Medium);
    group.bench_function("roundtrip_medium", |b| {
        b.iter(|| {
            let diagram = merge(black_box(&registry), black_box(&timeline), None);
            let (registry_out, timeline_out) = split(&diagram, &registry, &timeline);
            black_box(checksum_document(&registry_out, &timeline_out))
        })
    });

    group.finish();
}

fn benches_store_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.pair");

    let (registry, timeline) = document::fixture(document::Case::Medium);
    let medium = DiagramDocument {
        registry,
        timeline,
        config: Default::default(),
    };

    let save_doc = medium.clone();
    group.bench_function("save_medium", move |b| {
        b.iter_batched_ref(
            || TempDir::new("store_pair_save_medium"),
            |tmp| {
                let folder = DiagramFolder::new(tmp.path());
                folder.save_pair("bench", black_box(&save_doc)).expect("save_pair");
                black_box(
                    std::fs::metadata(folder.graph_path("bench"))
                        .expect("graph metadata")
                        .len(),
                )
            },
            BatchSize::SmallInput,
        )
    });

    let load_doc = medium.clone();
    group.bench_function("load_medium", move |b| {
        b.iter_batched_ref(
            || {
                let tmp = TempDir::new("store_pair_load_medium");
                let folder = DiagramFolder::new(tmp.path());
                folder.save_pair("bench", &load_doc).expect("save_pair");
                (tmp, folder)
            },
            |(_tmp, folder)| {
                let document = folder.load_pair("bench").expect("load_pair");
                black_box(checksum_document(&document.registry, &document.timeline))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_merge, benches_split, benches_store_pair
}
criterion_main!(benches);
