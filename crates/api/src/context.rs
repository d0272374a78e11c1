use curation_auth::{JwtClaims, Principal, Role};
use curation_core::UserId;

/// Authenticated actor for a request.
///
/// Inserted by the auth middleware; every protected route extracts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    principal: Principal,
}

impl ActorContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self::new(Principal::from_claims(claims))
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.principal.roles
    }
}
