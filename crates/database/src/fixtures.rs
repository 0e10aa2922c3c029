// Seeding helpers for database-backed tests.
// Tables are created as TEMP tables on a single-connection pool, so each
// test sees its own empty schema and nothing outlives the pool.

use crate::error::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TEMP TABLE organization_memberships (
        id BIGSERIAL PRIMARY KEY,
        user_id UUID NOT NULL,
        organization_id TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
        UNIQUE (user_id, organization_id)
    )
    "#,
    r#"
    CREATE TEMP TABLE roles (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TEMP TABLE organization_membership_roles (
        organization_membership_id BIGINT NOT NULL,
        role_id BIGINT NOT NULL,
        active BOOLEAN NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
];

/// Single-connection pool with an empty membership schema.
///
/// Connects to `DATABASE_URL`.
pub async fn scratch_pool() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL").map_err(|_| {
        crate::error::DatabaseError::Other("DATABASE_URL must be set".to_string())
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(&url)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

/// Grant `role` in `organization_id` to a user, creating the membership
/// and role rows on first use.
pub async fn grant_role(
    pool: &PgPool,
    user_id: Uuid,
    organization_id: &str,
    role: &str,
    active: bool,
) -> Result<()> {
    let membership_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO organization_memberships (user_id, organization_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, organization_id)
            DO UPDATE SET organization_id = EXCLUDED.organization_id
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(organization_id)
    .fetch_one(pool)
    .await?;

    let role_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO roles (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(role)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO organization_membership_roles (organization_membership_id, role_id, active)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(membership_id)
    .bind(role_id)
    .bind(active)
    .execute(pool)
    .await?;

    Ok(())
}
