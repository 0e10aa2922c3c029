use serde::{Deserialize, Serialize};
use std::fmt;

/// Role label held within one organization.
///
/// Only `learner` and `owner` take part in default-organization selection;
/// every other label (including `member`) is still a valid membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    Member,
    Learner,
    Owner,
    /// Any label not known to this crate, kept verbatim
    Other(String),
}

impl RoleName {
    pub fn as_str(&self) -> &str {
        match self {
            RoleName::Member => "member",
            RoleName::Learner => "learner",
            RoleName::Owner => "owner",
            RoleName::Other(name) => name,
        }
    }
}

impl From<&str> for RoleName {
    fn from(value: &str) -> Self {
        RoleName::from(value.to_string())
    }
}

impl From<String> for RoleName {
    fn from(value: String) -> Self {
        match value.as_str() {
            "member" => RoleName::Member,
            "learner" => RoleName::Learner,
            "owner" => RoleName::Owner,
            _ => RoleName::Other(value),
        }
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        match role {
            RoleName::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One membership grant of a user into an organization.
///
/// Revocation flips `active` to false instead of deleting the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRole {
    pub organization_id: String,
    pub name: RoleName,
    pub active: bool,
}

impl OrganizationRole {
    pub fn new(organization_id: impl Into<String>, name: impl Into<RoleName>, active: bool) -> Self {
        Self {
            organization_id: organization_id.into(),
            name: name.into(),
            active,
        }
    }

    pub fn active(organization_id: impl Into<String>, name: impl Into<RoleName>) -> Self {
        Self::new(organization_id, name, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_role_names() {
        assert_eq!(RoleName::from("member"), RoleName::Member);
        assert_eq!(RoleName::from("learner"), RoleName::Learner);
        assert_eq!(RoleName::from("owner"), RoleName::Owner);
    }

    #[test]
    fn test_str_and_string_parse_alike() {
        for name in ["member", "learner", "owner", "instructor", ""] {
            assert_eq!(RoleName::from(name), RoleName::from(name.to_string()));
        }
    }

    #[test]
    fn test_unknown_role_name_is_kept_verbatim() {
        let role = RoleName::from("Owner".to_string());
        assert_eq!(role, RoleName::Other("Owner".to_string()));
        assert_eq!(role.to_string(), "Owner");
        assert_eq!(String::from(role), "Owner");
    }

    #[test]
    fn test_organization_role_json_shape() {
        let role: OrganizationRole = serde_json::from_str(
            r#"{"organizationId":"org-1","name":"learner","active":true}"#,
        )
        .expect("Failed to parse role");

        assert_eq!(role, OrganizationRole::active("org-1", RoleName::Learner));

        let json = serde_json::to_value(OrganizationRole::new("org-2", "instructor", false))
            .expect("Failed to serialize role");
        assert_eq!(json["organizationId"], "org-2");
        assert_eq!(json["name"], "instructor");
        assert_eq!(json["active"], false);
    }
}
