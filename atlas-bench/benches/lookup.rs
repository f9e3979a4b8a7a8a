//! Mirror benchmark suite.
//!
//! Targets worth watching:
//!   stage_index_build_1k ....... full rebuild of a 1 000-stage table
//!   find_stage_by_level ........ hot read path during request handling
//!   find_character_full_id ..... split + probe on every strategy view

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use atlas_core::config::MirrorConfig;
use atlas_core::fetch::StaticFetcher;
use atlas_core::index::{StageIndex, build_character_index};
use atlas_core::mirror::GameDataMirror;
use atlas_core::types::{Character, Dataset, Stage};

fn make_stage(i: u32) -> (String, Stage) {
    let key = format!("main_{:02}-{:02}", i / 100, i % 100);
    let stage = Stage {
        stage_id: key.clone(),
        level_id: Some(format!("Obt/Main/level_{key}")),
        code: format!("{}-{}", i / 100, i % 100),
        name: Some(format!("Operation {i}")),
        zone_id: format!("main_{}", i / 100),
    };
    (key, stage)
}

fn stage_entries(n: u32) -> HashMap<String, Stage> {
    (0..n).map(make_stage).collect()
}

fn character_entries(n: u32) -> HashMap<String, Character> {
    (0..n)
        .map(|i| {
            let id = format!("char_{}_{:03}", i % 6, i);
            (
                id.clone(),
                Character {
                    id,
                    name: Some(format!("Operator {i}")),
                    profession: Some("PIONEER".to_string()),
                    rarity: Some((i % 6) as i32),
                },
            )
        })
        .collect()
}

/// A mirror seeded through a static fetcher, so lookups run against
/// realistically built snapshots.
fn seeded_mirror() -> GameDataMirror {
    let config = MirrorConfig::default();
    let fetcher = StaticFetcher::new();

    let stages: HashMap<String, serde_json::Value> = stage_entries(1_000)
        .into_iter()
        .map(|(k, v)| (k, serde_json::to_value(v).expect("stage json")))
        .collect();
    fetcher.insert(
        config.endpoint(Dataset::Stage),
        serde_json::json!({ "stages": stages }).to_string(),
    );

    let characters: HashMap<String, serde_json::Value> = character_entries(500)
        .into_iter()
        .map(|(k, v)| (k, serde_json::to_value(v).expect("character json")))
        .collect();
    fetcher.insert(
        config.endpoint(Dataset::Character),
        serde_json::to_string(&characters).expect("character doc"),
    );

    let mirror = GameDataMirror::new(Arc::new(fetcher), config);
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    runtime.block_on(async {
        mirror.sync_stages().await.expect("stage sync");
        mirror.sync_characters().await.expect("character sync");
    });
    mirror
}

/// Benchmark: full stage index rebuild from a 1 000-entry table.
fn bench_stage_index_build(c: &mut Criterion) {
    c.bench_function("stage_index_build_1k", |b| {
        b.iter_batched(
            || stage_entries(1_000),
            |entries| black_box(StageIndex::build(entries)),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark: character index build with the 3-segment filter.
fn bench_character_index_build(c: &mut Criterion) {
    c.bench_function("character_index_build_500", |b| {
        b.iter_batched(
            || character_entries(500),
            |entries| black_box(build_character_index(entries)),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark: level-id lookup with code check (the request hot path).
fn bench_find_stage(c: &mut Criterion) {
    let mirror = seeded_mirror();
    c.bench_function("find_stage_by_level", |b| {
        b.iter(|| {
            black_box(mirror.find_stage(
                black_box("obt/main/level_main_05-05"),
                black_box("5-5"),
                black_box("main_05-05"),
            ))
        });
    });
}

/// Benchmark: character lookup via full compound id.
fn bench_find_character(c: &mut Criterion) {
    let mirror = seeded_mirror();
    c.bench_function("find_character_full_id", |b| {
        b.iter(|| black_box(mirror.find_character(black_box("char_3_243"))));
    });
}

criterion_group!(
    benches,
    bench_stage_index_build,
    bench_character_index_build,
    bench_find_stage,
    bench_find_character
);
criterion_main!(benches);
