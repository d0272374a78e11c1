//! `curation-core`: shared identifiers, versioning and the domain error model.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod version;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ChannelId, ChannelSetId, SecretTokenId, UserId};
pub use version::ExpectedVersion;
