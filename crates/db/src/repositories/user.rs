//! User repository for account operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use staffly_shared::types::{PageRequest, Role, Status};

use crate::entities::{employees, users};
use crate::repositories::audit::{AuditContext, AuditLogRepository};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already registered.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Audit payload serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns `UserError::DuplicateEmail` if the email is taken, or a
    /// database error on insert failure.
    pub async fn create(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<users::Model, UserError> {
        if self.email_exists(email).await? {
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_str().to_string()),
            status: Set(Status::Active.as_str().to_string()),
            created_on: Set(chrono::Utc::now().date_naive()),
        };

        Ok(user.insert(&self.db).await?)
    }

    /// Lists users ordered by creation date, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: PageRequest) -> Result<(Vec<users::Model>, u64), DbErr> {
        let page = page.clamped();

        let total = users::Entity::find().count(&self.db).await?;
        let data = users::Entity::find()
            .order_by_desc(users::Column::CreatedOn)
            .order_by_asc(users::Column::Email)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((data, total))
    }

    /// Flips a user between active and inactive.
    ///
    /// The linked employee record, if one exists, is flipped to the same
    /// status inside the same transaction so the pair never drifts apart.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if the user does not exist, or a
    /// database error on failure.
    pub async fn toggle_status(
        &self,
        id: Uuid,
        ctx: &AuditContext,
    ) -> Result<(users::Model, Status), UserError> {
        let txn = self.db.begin().await?;

        let user = users::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let current = Status::parse(&user.status).unwrap_or_default();
        let next = current.toggled();

        let old_data = serde_json::to_value(&user)?;

        let mut active: users::ActiveModel = user.into();
        active.status = Set(next.as_str().to_string());
        let updated = active.update(&txn).await?;

        if let Some(employee) = employees::Entity::find()
            .filter(employees::Column::UserId.eq(id))
            .one(&txn)
            .await?
        {
            let mut active: employees::ActiveModel = employee.into();
            active.status = Set(next.as_str().to_string());
            active.update(&txn).await?;
        }

        AuditLogRepository::record_with(
            &txn,
            ctx,
            "toggle_status",
            "users",
            Some(id),
            Some(old_data),
            Some(serde_json::to_value(&updated)?),
        )
        .await?;

        txn.commit().await?;

        Ok((updated, next))
    }
}
