//! Sync handlers for the resource types this service exposes.

pub mod channel;
pub mod channel_set;
mod fields;

use std::sync::Arc;

use curation_sync::{BatchApplier, SyncRegistry};

use crate::store::CurationStore;

pub use channel::{ChannelHandler, CHANNEL};
pub use channel_set::{ChannelSetChanges, ChannelSetHandler, CHANNELSET};

/// Registry with every resource type backed by `store`.
pub fn registry<S>(store: Arc<S>) -> SyncRegistry
where
    S: CurationStore + 'static,
{
    SyncRegistry::new()
        .register(Arc::new(ChannelSetHandler::new(store.clone())))
        .register(Arc::new(ChannelHandler::new(store)))
}

pub fn batch_applier<S>(store: Arc<S>) -> BatchApplier
where
    S: CurationStore + 'static,
{
    BatchApplier::new(registry(store))
}
