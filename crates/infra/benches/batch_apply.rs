use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use curation_auth::{Principal, Role};
use curation_core::{ChannelId, ChannelSetId, UserId};
use curation_infra::{batch_applier, Channel, ChannelSet, CurationStore, InMemoryCurationStore, CHANNELSET};
use curation_sync::{generate_create_event, generate_update_event};

fn seeded(channels: usize) -> (std::sync::Arc<InMemoryCurationStore>, Principal, Vec<ChannelId>) {
    let store = InMemoryCurationStore::arc();
    let editor = Principal::new(UserId::new(), vec![Role::new("editor")]);
    let ids: Vec<ChannelId> = (0..channels).map(|_| ChannelId::new()).collect();
    for id in &ids {
        store
            .upsert_channel(Channel::new(*id, "bench").with_editor(editor.user_id))
            .unwrap();
    }
    (store, editor, ids)
}

fn bench_create_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_create_batch");

    for size in [1usize, 10, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let (store, editor, channels) = seeded(5);
            let applier = batch_applier(store);
            let channel_ids: Vec<String> = channels.iter().map(ToString::to_string).collect();

            b.iter(|| {
                let events = (0..size)
                    .map(|i| {
                        generate_create_event(
                            ChannelSetId::new(),
                            CHANNELSET,
                            json!({"name": format!("set {i}"), "channels": channel_ids}),
                        )
                    })
                    .collect();
                black_box(applier.apply_batch(&editor, events))
            });
        });
    }

    group.finish();
}

/// Channel reassignment is the hot path: each update rewrites the token mirror.
fn bench_channel_reassignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_channel_reassignment");

    for channels in [1usize, 50, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(channels), &channels, |b, &channels| {
            let (store, editor, ids) = seeded(channels);
            let set = ChannelSetId::new();
            store
                .insert_channel_set(ChannelSet::new(set, "bench").with_editor(editor.user_id))
                .unwrap();
            let applier = batch_applier(store);
            let all: Vec<String> = ids.iter().map(ToString::to_string).collect();

            b.iter(|| {
                let events = vec![
                    generate_update_event(set, CHANNELSET, json!({"channels": all})),
                    generate_update_event(set, CHANNELSET, json!({"channels": []})),
                ];
                black_box(applier.apply_batch(&editor, events))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create_batches, bench_channel_reassignment);
criterion_main!(benches);
