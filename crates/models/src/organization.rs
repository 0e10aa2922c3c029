use crate::organization_role::{OrganizationRole, RoleName};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Active roles a user holds in a single organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMembership {
    pub organization_id: String,
    pub roles: Vec<RoleName>,
}

impl OrganizationMembership {
    /// Groups active roles by organization, keeping first-seen order for
    /// both organizations and role names. Inactive and duplicate roles are
    /// dropped.
    pub fn group(roles: &[OrganizationRole]) -> Vec<OrganizationMembership> {
        let mut memberships: Vec<OrganizationMembership> = Vec::new();

        for role in roles.iter().filter(|role| role.active) {
            match memberships
                .iter_mut()
                .find(|m| m.organization_id == role.organization_id)
            {
                Some(membership) => {
                    if !membership.roles.contains(&role.name) {
                        membership.roles.push(role.name.clone());
                    }
                }
                None => memberships.push(OrganizationMembership {
                    organization_id: role.organization_id.clone(),
                    roles: vec![role.name.clone()],
                }),
            }
        }

        memberships
    }
}

/// Select organization request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SelectOrganization {
    #[validate(length(min = 1, max = 255))]
    pub organization_id: String,
}
