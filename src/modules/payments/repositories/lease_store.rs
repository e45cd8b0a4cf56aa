use crate::core::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

/// The slice of a lease the payment flow touches.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lease {
    pub id: String,
    pub property_id: String,
    pub tenant_id: String,
    pub landlord_id: String,
    pub is_active: bool,
    pub signed_by_tenant: bool,
    pub signed_by_landlord: bool,
}

impl Lease {
    /// The admin fee becomes due once both parties have signed.
    pub fn fully_signed(&self) -> bool {
        self.signed_by_tenant && self.signed_by_landlord
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatus {
    Available,
    Occupied,
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyStatus::Available => write!(f, "available"),
            PropertyStatus::Occupied => write!(f, "occupied"),
        }
    }
}

/// Lease and property mutations triggered by a completed move-in.
#[async_trait]
pub trait LeaseStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Lease>>;

    /// Mark the lease active.
    async fn activate(&self, id: &str) -> Result<()>;

    /// Flip the property's listing status.
    async fn set_property_status(&self, property_id: &str, status: PropertyStatus) -> Result<()>;
}

pub struct MySqlLeaseStore {
    pool: MySqlPool,
}

impl MySqlLeaseStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaseStore for MySqlLeaseStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Lease>> {
        let lease = sqlx::query_as::<_, Lease>(
            r#"
            SELECT id, property_id, tenant_id, landlord_id,
                   is_active, signed_by_tenant, signed_by_landlord
            FROM leases
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lease)
    }

    async fn activate(&self, id: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE leases
            SET is_active = TRUE, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Lease with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn set_property_status(&self, property_id: &str, status: PropertyStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET status = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(status.to_string())
        .bind(property_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Property with id '{}' not found",
                property_id
            )));
        }

        Ok(())
    }
}
