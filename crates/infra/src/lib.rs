//! Infrastructure layer: resource storage, the channel-set write path and the
//! sync handlers backed by it.

pub mod handlers;
pub mod model;
pub mod store;
pub mod token;


pub use handlers::{
    batch_applier, registry, ChannelHandler, ChannelSetChanges, ChannelSetHandler, CHANNEL, CHANNELSET,
};
pub use model::{Channel, ChannelSet, ChannelSetRecord, ChannelSetView, ChannelView, SecretToken};
pub use store::{CurationStore, InMemoryCurationStore, StoreError};
