use thiserror::Error;

use curation_core::{ChannelId, ChannelSetId, UserId};

use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    #[error("forbidden: user cannot edit channel {0}")]
    ChannelNotEditable(ChannelId),

    #[error("forbidden: user is not an editor of channel set {0}")]
    ChannelSetNotEditable(ChannelSetId),
}

/// Object-level edit predicate.
///
/// Implemented by whatever owns the editor relations (the resource store).
/// Answers are plain booleans: an unknown object is simply not editable.
pub trait EditPolicy {
    fn can_edit_channel(&self, user: UserId, channel: ChannelId) -> bool;
    fn can_edit_channel_set(&self, user: UserId, channel_set: ChannelSetId) -> bool;
}

/// Route-level permission check.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    if principal.has_permission(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Require edit rights on every listed channel.
///
/// Fails on the first channel (in iteration order) the principal cannot edit.
pub fn require_channels_edit<'a, P, I>(
    policy: &P,
    principal: &Principal,
    channels: I,
) -> Result<(), AuthzError>
where
    P: EditPolicy + ?Sized,
    I: IntoIterator<Item = &'a ChannelId>,
{
    if principal.is_global_editor() {
        return Ok(());
    }

    for channel in channels {
        if !policy.can_edit_channel(principal.user_id, *channel) {
            tracing::debug!(user_id = %principal.user_id, channel_id = %channel, "channel not editable");
            return Err(AuthzError::ChannelNotEditable(*channel));
        }
    }
    Ok(())
}

/// Require membership in a channel set's editor relation.
pub fn require_channel_set_edit<P>(
    policy: &P,
    principal: &Principal,
    channel_set: ChannelSetId,
) -> Result<(), AuthzError>
where
    P: EditPolicy + ?Sized,
{
    if principal.is_global_editor() || policy.can_edit_channel_set(principal.user_id, channel_set) {
        Ok(())
    } else {
        Err(AuthzError::ChannelSetNotEditable(channel_set))
    }
}
