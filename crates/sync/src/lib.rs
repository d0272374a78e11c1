//! Batched change-event application ("sync").
//!
//! A client submits an ordered list of change events, each naming a resource
//! type, a target id, an operation kind and a payload. Every event is validated
//! and applied on its own; the batch as a whole only fails when it is not a
//! list at all.
//!
//! ```text
//! raw JSON ──validate──▶ ChangeEvent ──ResourceHandler──▶ Applied(resource)
//!      │                                     │
//!      └──────────────▶ Rejected ◀───────────┘
//! ```

pub mod applier;
pub mod constructors;
pub mod event;
pub mod handler;
pub mod outcome;

pub use applier::{BatchApplier, SyncRegistry};
pub use constructors::{generate_create_event, generate_delete_event, generate_update_event};
pub use event::{ChangeEvent, ChangeKind};
pub use handler::{ApplyError, ApplyResult, ResourceHandler};
pub use outcome::{BatchReport, EventError, EventOutcome, EventStage};
