use cb_models::{OrgAuthResult, OrganizationRole, RoleName};

/// Decide which organization a user operates in.
///
/// Inactive roles are ignored. A selection backed by any active role wins;
/// otherwise the first active `learner` role, then the first active `owner`
/// role, becomes the new selection. With neither, the user is sent to the
/// organization list. Roles are scanned once in the order given.
pub fn determine_org_access(
    roles: &[OrganizationRole],
    current_org_id: Option<&str>,
) -> OrgAuthResult {
    let current_org_id = current_org_id.filter(|id| !id.is_empty());

    let mut learner_role: Option<&OrganizationRole> = None;
    let mut owner_role: Option<&OrganizationRole> = None;
    let mut has_valid_current_org_role = false;

    for role in roles.iter().filter(|role| role.active) {
        match role.name {
            RoleName::Learner if learner_role.is_none() => learner_role = Some(role),
            RoleName::Owner if owner_role.is_none() => owner_role = Some(role),
            _ => {}
        }

        if current_org_id == Some(role.organization_id.as_str()) {
            has_valid_current_org_role = true;
        }
    }

    match (current_org_id, has_valid_current_org_role) {
        (Some(current), true) => OrgAuthResult::UseCurrentOrg {
            organization_id: current.to_string(),
        },
        _ => match learner_role.or(owner_role) {
            Some(role) => OrgAuthResult::SetOwnerOrg {
                organization_id: role.organization_id.clone(),
            },
            None => OrgAuthResult::RedirectToOrgList,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(organization_id: &str, name: &str, active: bool) -> OrganizationRole {
        OrganizationRole::new(organization_id, name, active)
    }

    fn set_owner(organization_id: &str) -> OrgAuthResult {
        OrgAuthResult::SetOwnerOrg {
            organization_id: organization_id.to_string(),
        }
    }

    fn use_current(organization_id: &str) -> OrgAuthResult {
        OrgAuthResult::UseCurrentOrg {
            organization_id: organization_id.to_string(),
        }
    }

    #[test]
    fn test_no_roles_redirects_to_org_list() {
        assert_eq!(
            determine_org_access(&[], Some("org-1")),
            OrgAuthResult::RedirectToOrgList
        );
        assert_eq!(determine_org_access(&[], None), OrgAuthResult::RedirectToOrgList);
    }

    #[test]
    fn test_only_inactive_roles_redirects_to_org_list() {
        let roles = vec![role("org-1", "member", false)];
        assert_eq!(
            determine_org_access(&roles, Some("org-1")),
            OrgAuthResult::RedirectToOrgList
        );

        let roles = vec![
            role("learner-org", "learner", false),
            role("owner-org", "owner", false),
            role("org-1", "member", false),
        ];
        for current in [None, Some("org-1"), Some("learner-org"), Some("owner-org")] {
            assert_eq!(
                determine_org_access(&roles, current),
                OrgAuthResult::RedirectToOrgList
            );
        }
    }

    #[test]
    fn test_learner_beats_owner_when_current_is_invalid() {
        let roles = vec![
            role("learner-org", "learner", true),
            role("owner-org", "owner", true),
        ];
        assert_eq!(
            determine_org_access(&roles, Some("org-different")),
            set_owner("learner-org")
        );

        // Order does not change learner priority
        let reversed = vec![
            role("owner-org", "owner", true),
            role("learner-org", "learner", true),
        ];
        assert_eq!(
            determine_org_access(&reversed, Some("org-different")),
            set_owner("learner-org")
        );
    }

    #[test]
    fn test_owner_fallback_without_current_org() {
        let roles = vec![role("owner-org", "owner", true)];
        assert_eq!(determine_org_access(&roles, None), set_owner("owner-org"));
    }

    #[test]
    fn test_member_role_validates_current_org() {
        let roles = vec![role("org-1", "member", true)];
        assert_eq!(determine_org_access(&roles, Some("org-1")), use_current("org-1"));
    }

    #[test]
    fn test_valid_current_org_beats_learner_and_owner() {
        let roles = vec![
            role("org-1", "member", true),
            role("learner-org", "learner", true),
            role("owner-org", "owner", true),
        ];
        assert_eq!(determine_org_access(&roles, Some("org-1")), use_current("org-1"));
    }

    #[test]
    fn test_unknown_role_validates_current_org() {
        let roles = vec![
            role("owner-org", "owner", true),
            role("org-1", "instructor", true),
        ];
        assert_eq!(determine_org_access(&roles, Some("org-1")), use_current("org-1"));
    }

    #[test]
    fn test_only_member_roles_without_match_redirects() {
        let roles = vec![
            role("org-1", "member", true),
            role("org-2", "instructor", true),
        ];
        assert_eq!(
            determine_org_access(&roles, Some("org-3")),
            OrgAuthResult::RedirectToOrgList
        );
        assert_eq!(determine_org_access(&roles, None), OrgAuthResult::RedirectToOrgList);
    }

    #[test]
    fn test_first_learner_wins() {
        let roles = vec![
            role("org-a", "member", true),
            role("learner-1", "learner", true),
            role("learner-2", "learner", true),
        ];
        assert_eq!(determine_org_access(&roles, None), set_owner("learner-1"));
    }

    #[test]
    fn test_first_owner_wins() {
        let roles = vec![
            role("owner-1", "owner", true),
            role("owner-2", "owner", true),
        ];
        assert_eq!(determine_org_access(&roles, Some("nope")), set_owner("owner-1"));
    }

    #[test]
    fn test_inactive_roles_do_not_take_part_in_fallback() {
        let roles = vec![
            role("stale-learner", "learner", false),
            role("owner-org", "owner", true),
            role("stale-current", "member", false),
        ];
        assert_eq!(
            determine_org_access(&roles, Some("stale-current")),
            set_owner("owner-org")
        );
    }

    #[test]
    fn test_inactive_learner_does_not_block_later_active_learner() {
        let roles = vec![
            role("stale-learner", "learner", false),
            role("live-learner", "learner", true),
        ];
        assert_eq!(determine_org_access(&roles, None), set_owner("live-learner"));
    }

    #[test]
    fn test_role_names_are_case_sensitive() {
        let roles = vec![role("org-1", "Learner", true), role("org-2", "OWNER", true)];
        assert_eq!(determine_org_access(&roles, None), OrgAuthResult::RedirectToOrgList);
    }

    #[test]
    fn test_duplicate_roles_are_tolerated() {
        let roles = vec![
            role("org-1", "owner", true),
            role("org-1", "owner", true),
            role("org-1", "owner", true),
        ];
        assert_eq!(determine_org_access(&roles, Some("org-1")), use_current("org-1"));
        assert_eq!(determine_org_access(&roles, Some("org-2")), set_owner("org-1"));
    }

    #[test]
    fn test_missing_current_org_matches_non_matching_current_org() {
        let cases = vec![
            vec![],
            vec![role("org-1", "member", true)],
            vec![role("owner-org", "owner", true)],
            vec![
                role("learner-org", "learner", true),
                role("owner-org", "owner", true),
            ],
            vec![role("org-1", "learner", false)],
        ];

        for roles in cases {
            assert_eq!(
                determine_org_access(&roles, None),
                determine_org_access(&roles, Some("does-not-exist"))
            );
        }
    }

    #[test]
    fn test_empty_current_org_is_treated_as_missing() {
        let roles = vec![role("", "member", true), role("owner-org", "owner", true)];
        assert_eq!(determine_org_access(&roles, Some("")), set_owner("owner-org"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let roles = vec![
            role("org-1", "member", true),
            role("learner-org", "learner", true),
            role("owner-org", "owner", false),
        ];

        for current in [None, Some("org-1"), Some("owner-org"), Some("other")] {
            let first = determine_org_access(&roles, current);
            let second = determine_org_access(&roles.clone(), current);
            assert_eq!(first, second);
        }
    }
}
