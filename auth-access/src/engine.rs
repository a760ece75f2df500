use crate::error::{AccessError, Result};
use crate::models::{Action, Decision, DenyReason, ResourceKind};
use crate::resolver::OwnershipResolver;
use auth_token::AuthIdentity;
use tracing::debug;
use uuid::Uuid;

/// Actions only SuperAdmin may perform, enumerated explicitly
///
/// Account deletion cascades through the whole ownership chain; vet and
/// visit deletion remove records other accounts depend on.
pub const RESERVED_ACTIONS: [(ResourceKind, Action); 3] = [
    (ResourceKind::Account, Action::Delete),
    (ResourceKind::Vet, Action::Delete),
    (ResourceKind::Visit, Action::Delete),
];

fn is_reserved(resource: ResourceKind, action: Action) -> bool {
    RESERVED_ACTIONS.contains(&(resource, action))
}

/// The one decision function every resource access funnels through
///
/// Rules are evaluated in order, first match wins:
/// 1. SuperAdmin: allow everything.
/// 2. Admin: allow everything except [`RESERVED_ACTIONS`].
/// 3. User: vet reads are open; deletes are never granted; read/create/
///    update only inside the caller's own ownership chain. Creation is
///    scoped by the parent resource (a pet under its owner, a visit under
///    its pet).
/// 4. No matching role: deny.
///
/// A resolver `NotFound` is a deny, so non-privileged callers cannot
/// probe which resources exist.
pub struct AccessEngine {
    resolver: OwnershipResolver,
}

impl AccessEngine {
    pub fn new(resolver: OwnershipResolver) -> Self {
        Self { resolver }
    }

    pub async fn authorize(
        &self,
        identity: &AuthIdentity,
        action: Action,
        resource: ResourceKind,
        resource_id: Option<Uuid>,
    ) -> Result<Decision> {
        let decision = self
            .evaluate(identity, action, resource, resource_id)
            .await?;
        match decision {
            Decision::Allow => {
                debug!(subject = %identity.subject_id, %action, %resource, "authorized");
            }
            Decision::Deny(reason) => {
                debug!(subject = %identity.subject_id, %action, %resource, %reason, "denied");
            }
        }
        Ok(decision)
    }

    async fn evaluate(
        &self,
        identity: &AuthIdentity,
        action: Action,
        resource: ResourceKind,
        resource_id: Option<Uuid>,
    ) -> Result<Decision> {
        if identity.is_superadmin() {
            return Ok(Decision::Allow);
        }

        if identity.is_admin() {
            if is_reserved(resource, action) {
                return Ok(Decision::Deny(DenyReason::ReservedAction));
            }
            return Ok(Decision::Allow);
        }

        if identity.has_role(auth_token::Role::User) {
            return self
                .evaluate_user(identity, action, resource, resource_id)
                .await;
        }

        Ok(Decision::Deny(DenyReason::InsufficientRole))
    }

    async fn evaluate_user(
        &self,
        identity: &AuthIdentity,
        action: Action,
        resource: ResourceKind,
        resource_id: Option<Uuid>,
    ) -> Result<Decision> {
        // The vet directory carries no ownership chain; reading it is open
        // to every authenticated role.
        if resource == ResourceKind::Vet && action == Action::Read {
            return Ok(Decision::Allow);
        }

        if action == Action::Delete {
            return Ok(Decision::Deny(DenyReason::ReservedAction));
        }

        let scope = match (resource, action) {
            // Creation is authorized against the parent scope.
            (ResourceKind::Pet, Action::Create) => ResourceKind::Owner,
            (ResourceKind::Visit, Action::Create) => ResourceKind::Pet,
            // Owners exist only via registration or an admin.
            (ResourceKind::Owner, Action::Create) => {
                return Ok(Decision::Deny(DenyReason::InsufficientRole));
            }
            (ResourceKind::Owner | ResourceKind::Pet | ResourceKind::Visit, _) => resource,
            _ => return Ok(Decision::Deny(DenyReason::InsufficientRole)),
        };

        // A collection-wide request has no id to resolve; a user never
        // owns the whole collection.
        let Some(resource_id) = resource_id else {
            return Ok(Decision::Deny(DenyReason::NotOwner));
        };

        match self
            .resolver
            .owns_transitively(identity.subject_id, scope, resource_id)
            .await
        {
            Ok(true) => Ok(Decision::Allow),
            Ok(false) => Ok(Decision::Deny(DenyReason::NotOwner)),
            // Fail closed: an unknown resource is not an owned resource.
            Err(AccessError::NotFound { .. }) => Ok(Decision::Deny(DenyReason::NotOwner)),
            Err(e) => Err(e),
        }
    }
}
