//! `curation-auth`: pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Object-level
//! checks ("may this user edit that channel?") are answered by whoever
//! implements [`EditPolicy`]; this crate only combines the answers.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, require_channel_set_edit, require_channels_edit, AuthzError, EditPolicy};
pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::{permissions_for_roles, Role};
