use serde::{Deserialize, Serialize};

/// Verdict of organization access resolution.
///
/// Serialized as `{"action": "SET_OWNER_ORG", "organizationId": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrgAuthResult {
    /// No usable organization; send the user to the organization picker
    RedirectToOrgList,

    /// No valid selection exists; persist this organization as the new one
    SetOwnerOrg {
        #[serde(rename = "organizationId")]
        organization_id: String,
    },

    /// The current selection is still backed by an active role
    UseCurrentOrg {
        #[serde(rename = "organizationId")]
        organization_id: String,
    },
}

impl OrgAuthResult {
    /// Organization the caller continues with, if any.
    pub fn organization_id(&self) -> Option<&str> {
        match self {
            OrgAuthResult::RedirectToOrgList => None,
            OrgAuthResult::SetOwnerOrg { organization_id }
            | OrgAuthResult::UseCurrentOrg { organization_id } => Some(organization_id),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            OrgAuthResult::RedirectToOrgList => "REDIRECT_TO_ORG_LIST",
            OrgAuthResult::SetOwnerOrg { .. } => "SET_OWNER_ORG",
            OrgAuthResult::UseCurrentOrg { .. } => "USE_CURRENT_ORG",
        }
    }
}
