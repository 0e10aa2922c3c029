// Tenant context for request handling

use cb_models::OrgAuthResult;
use uuid::Uuid;

/// Active organization of an authenticated request, after its access
/// verdict has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub user_id: Uuid,
    pub organization_id: String,
    /// True when the selection was just defaulted and persisted
    pub selection_changed: bool,
}

impl TenantContext {
    pub fn new(user_id: Uuid, organization_id: impl Into<String>) -> Self {
        Self {
            user_id,
            organization_id: organization_id.into(),
            selection_changed: false,
        }
    }

    /// Build the context a verdict leads to. `None` for a redirect.
    pub fn from_verdict(user_id: Uuid, verdict: &OrgAuthResult) -> Option<Self> {
        match verdict {
            OrgAuthResult::RedirectToOrgList => None,
            OrgAuthResult::SetOwnerOrg { organization_id } => Some(Self {
                user_id,
                organization_id: organization_id.clone(),
                selection_changed: true,
            }),
            OrgAuthResult::UseCurrentOrg { organization_id } => {
                Some(Self::new(user_id, organization_id.clone()))
            }
        }
    }
}
