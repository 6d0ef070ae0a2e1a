//! Append-only audit log repository.
//!
//! Every mutation in the system leaves a row here. Rows are only ever
//! inserted; there is no update or delete path on purpose.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::audit_logs;

/// Who performed a change and from where.
#[derive(Debug, Clone, Default)]
pub struct AuditContext {
    /// Acting user, if authenticated.
    pub actor_id: Option<Uuid>,
    /// Client address as reported by the front proxy.
    pub ip_address: Option<String>,
    /// Client user agent string.
    pub user_agent: Option<String>,
}

/// Repository for writing and reading audit log rows.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    /// Creates a new audit log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a change against the repository's own connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn record(
        &self,
        ctx: &AuditContext,
        action: &str,
        table_name: &str,
        record_id: Option<Uuid>,
        old_data: Option<Value>,
        new_data: Option<Value>,
    ) -> Result<audit_logs::Model, DbErr> {
        Self::record_with(&self.db, ctx, action, table_name, record_id, old_data, new_data).await
    }

    /// Records a change on an explicit connection.
    ///
    /// Takes any [`ConnectionTrait`] so callers can pass a transaction and
    /// have the audit row commit or roll back together with the change it
    /// describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn record_with<C: ConnectionTrait>(
        conn: &C,
        ctx: &AuditContext,
        action: &str,
        table_name: &str,
        record_id: Option<Uuid>,
        old_data: Option<Value>,
        new_data: Option<Value>,
    ) -> Result<audit_logs::Model, DbErr> {
        let entry = audit_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(ctx.actor_id),
            action: Set(action.to_string()),
            table_name: Set(table_name.to_string()),
            record_id: Set(record_id),
            old_data: Set(old_data),
            new_data: Set(new_data),
            ip_address: Set(ctx.ip_address.clone()),
            user_agent: Set(ctx.user_agent.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };

        entry.insert(conn).await
    }

    /// Lists the change history for one record, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history_for(
        &self,
        table_name: &str,
        record_id: Uuid,
    ) -> Result<Vec<audit_logs::Model>, DbErr> {
        audit_logs::Entity::find()
            .filter(audit_logs::Column::TableName.eq(table_name))
            .filter(audit_logs::Column::RecordId.eq(record_id))
            .order_by_desc(audit_logs::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
