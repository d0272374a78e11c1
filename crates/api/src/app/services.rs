use std::sync::Arc;

use curation_infra::{batch_applier, ChannelSetHandler, InMemoryCurationStore};
use curation_sync::BatchApplier;

/// Everything the routes need, shared behind one `Arc`.
///
/// The sync applier and the CRUD handler are built over the same store, so
/// both interfaces observe each other's writes immediately.
pub struct AppServices {
    pub store: Arc<InMemoryCurationStore>,
    pub applier: BatchApplier,
    pub channel_sets: ChannelSetHandler<InMemoryCurationStore>,
}

impl AppServices {
    pub fn new(store: Arc<InMemoryCurationStore>) -> Self {
        let applier = batch_applier(store.clone());
        tracing::info!(
            resource_types = ?applier.registry().resource_types(),
            "sync handlers registered"
        );
        Self {
            applier,
            channel_sets: ChannelSetHandler::new(store.clone()),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(InMemoryCurationStore::arc())
    }
}
