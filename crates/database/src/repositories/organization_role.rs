use crate::error::Result;
use cb_models::OrganizationRole;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct OrganizationRoleRow {
    organization_id: String,
    role_name: String,
    active: bool,
}

impl From<OrganizationRoleRow> for OrganizationRole {
    fn from(row: OrganizationRoleRow) -> Self {
        OrganizationRole::new(row.organization_id, row.role_name, row.active)
    }
}

/// Reads organization role grants.
///
/// Rows come back oldest membership first, then oldest grant first, so the
/// first learner/owner seen by the resolver is stable across requests.
#[derive(Clone)]
pub struct OrganizationRoleRepository {
    pool: PgPool,
}

impl OrganizationRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All role grants for a user, inactive ones included
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<OrganizationRole>> {
        let rows = sqlx::query_as::<_, OrganizationRoleRow>(
            r#"
            SELECT om.organization_id, r.name AS role_name, omr.active
            FROM organization_memberships om
            INNER JOIN organization_membership_roles omr
                ON omr.organization_membership_id = om.id
            INNER JOIN roles r ON r.id = omr.role_id
            WHERE om.user_id = $1
            ORDER BY om.created_at, omr.created_at, r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(%user_id, count = rows.len(), "Loaded organization roles");

        Ok(rows.into_iter().map(OrganizationRole::from).collect())
    }

    /// Check if the user holds any active role in an organization
    pub async fn has_active_role(&self, user_id: Uuid, organization_id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM organization_memberships om
                INNER JOIN organization_membership_roles omr
                    ON omr.organization_membership_id = om.id
                WHERE om.user_id = $1 AND om.organization_id = $2 AND omr.active
            )
            "#,
        )
        .bind(user_id)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
