//! Employee repository.
//!
//! Employee records always travel with their owning user account: creation
//! inserts both rows in one transaction, and status changes flip both rows
//! together.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use staffly_core::auth::{hash_password, PasswordError};
use staffly_shared::types::{PageRequest, Role, Status};

use crate::entities::{employees, users};
use crate::repositories::audit::{AuditContext, AuditLogRepository};

/// Error types for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    /// Employee not found.
    #[error("Employee not found: {0}")]
    NotFound(Uuid),

    /// Email already registered.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Initial password could not be derived.
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Audit payload serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Input for creating an employee together with its user account.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    pub salary: Option<Decimal>,
    pub hire_date: NaiveDate,
    pub dob: NaiveDate,
}

/// Input for updating an employee. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeInput {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<Option<Decimal>>,
    pub hire_date: Option<NaiveDate>,
    pub dob: Option<NaiveDate>,
}

/// Employee joined with its owning user account.
#[derive(Debug, Clone)]
pub struct EmployeeWithUser {
    pub employee: employees::Model,
    pub user: users::Model,
}

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists employees with their user accounts, newest hires first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<EmployeeWithUser>, u64), DbErr> {
        let page = page.clamped();

        let total = employees::Entity::find().count(&self.db).await?;
        let rows = employees::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(employees::Column::HireDate)
            .order_by_asc(employees::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let data = rows
            .into_iter()
            .filter_map(|(employee, user)| user.map(|user| EmployeeWithUser { employee, user }))
            .collect();

        Ok((data, total))
    }

    /// Finds an employee by ID together with its user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeWithUser>, DbErr> {
        let row = employees::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        Ok(row.and_then(|(employee, user)| user.map(|user| EmployeeWithUser { employee, user })))
    }

    /// Finds the employee record owned by a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<EmployeeWithUser>, DbErr> {
        let row = employees::Entity::find()
            .filter(employees::Column::UserId.eq(user_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        Ok(row.and_then(|(employee, user)| user.map(|user| EmployeeWithUser { employee, user })))
    }

    /// Creates an employee and its user account in one transaction.
    ///
    /// The account is created with the Employee role and the date of birth
    /// (ISO format) as the initial password, which the employee is expected
    /// to change on first login.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeError::DuplicateEmail` if the email is taken, or an
    /// error if hashing or the database inserts fail.
    pub async fn create(
        &self,
        input: CreateEmployeeInput,
        ctx: &AuditContext,
    ) -> Result<EmployeeWithUser, EmployeeError> {
        let initial_password = input.dob.format("%Y-%m-%d").to_string();
        let password_hash = hash_password(&initial_password)?;

        let txn = self.db.begin().await?;

        let taken = users::Entity::find()
            .filter(users::Column::Email.eq(input.email.as_str()))
            .count(&txn)
            .await?;
        if taken > 0 {
            return Err(EmployeeError::DuplicateEmail(input.email));
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name),
            email: Set(input.email),
            password_hash: Set(password_hash),
            role: Set(Role::Employee.as_str().to_string()),
            status: Set(Status::Active.as_str().to_string()),
            created_on: Set(chrono::Utc::now().date_naive()),
        };
        let user = user.insert(&txn).await?;

        let employee = employees::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            phone: Set(input.phone),
            department: Set(input.department),
            designation: Set(input.designation),
            salary: Set(input.salary),
            hire_date: Set(input.hire_date),
            dob: Set(input.dob),
            status: Set(Status::Active.as_str().to_string()),
            id_proof: Set(None),
        };
        let employee = employee.insert(&txn).await?;

        AuditLogRepository::record_with(
            &txn,
            ctx,
            "create",
            "employees",
            Some(employee.id),
            None,
            Some(serde_json::to_value(&employee)?),
        )
        .await?;

        txn.commit().await?;

        Ok(EmployeeWithUser { employee, user })
    }

    /// Updates an employee's details.
    ///
    /// A changed full name is written through to the user account so the
    /// two records keep telling the same story.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeError::NotFound` if the employee does not exist, or
    /// a database error on failure.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateEmployeeInput,
        ctx: &AuditContext,
    ) -> Result<EmployeeWithUser, EmployeeError> {
        let txn = self.db.begin().await?;

        let (employee, user) = employees::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&txn)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;
        let user = user.ok_or(EmployeeError::NotFound(id))?;

        let old_data = serde_json::to_value(&employee)?;

        let mut active: employees::ActiveModel = employee.into();
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(department) = input.department {
            active.department = Set(department);
        }
        if let Some(designation) = input.designation {
            active.designation = Set(designation);
        }
        if let Some(salary) = input.salary {
            active.salary = Set(salary);
        }
        if let Some(hire_date) = input.hire_date {
            active.hire_date = Set(hire_date);
        }
        if let Some(dob) = input.dob {
            active.dob = Set(dob);
        }
        let employee = active.update(&txn).await?;

        let user = if let Some(full_name) = input.full_name {
            let mut active: users::ActiveModel = user.into();
            active.full_name = Set(full_name);
            active.update(&txn).await?
        } else {
            user
        };

        AuditLogRepository::record_with(
            &txn,
            ctx,
            "update",
            "employees",
            Some(id),
            Some(old_data),
            Some(serde_json::to_value(&employee)?),
        )
        .await?;

        txn.commit().await?;

        Ok(EmployeeWithUser { employee, user })
    }

    /// Flips an employee between active and inactive.
    ///
    /// The owning user account is flipped to the same status inside the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeError::NotFound` if the employee does not exist, or
    /// a database error on failure.
    pub async fn toggle_status(
        &self,
        id: Uuid,
        ctx: &AuditContext,
    ) -> Result<(EmployeeWithUser, Status), EmployeeError> {
        let txn = self.db.begin().await?;

        let (employee, user) = employees::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&txn)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;
        let user = user.ok_or(EmployeeError::NotFound(id))?;

        let current = Status::parse(&employee.status).unwrap_or_default();
        let next = current.toggled();

        let old_data = serde_json::to_value(&employee)?;

        let mut active: employees::ActiveModel = employee.into();
        active.status = Set(next.as_str().to_string());
        let employee = active.update(&txn).await?;

        let mut active: users::ActiveModel = user.into();
        active.status = Set(next.as_str().to_string());
        let user = active.update(&txn).await?;

        AuditLogRepository::record_with(
            &txn,
            ctx,
            "toggle_status",
            "employees",
            Some(id),
            Some(old_data),
            Some(serde_json::to_value(&employee)?),
        )
        .await?;

        txn.commit().await?;

        Ok((EmployeeWithUser { employee, user }, next))
    }

    /// Records the stored filename of an employee's ID proof.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeError::NotFound` if the employee does not exist, or
    /// a database error on failure.
    pub async fn set_id_proof(
        &self,
        id: Uuid,
        stored_name: &str,
        ctx: &AuditContext,
    ) -> Result<employees::Model, EmployeeError> {
        let txn = self.db.begin().await?;

        let employee = employees::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        let old_data = serde_json::to_value(&employee)?;

        let mut active: employees::ActiveModel = employee.into();
        active.id_proof = Set(Some(stored_name.to_string()));
        let employee = active.update(&txn).await?;

        AuditLogRepository::record_with(
            &txn,
            ctx,
            "upload_id_proof",
            "employees",
            Some(id),
            Some(old_data),
            Some(serde_json::to_value(&employee)?),
        )
        .await?;

        txn.commit().await?;

        Ok(employee)
    }

    /// Counts employees grouped by status for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_by_status(&self) -> Result<(u64, u64), DbErr> {
        let active = employees::Entity::find()
            .filter(employees::Column::Status.eq(Status::Active.as_str()))
            .count(&self.db)
            .await?;
        let inactive = employees::Entity::find()
            .filter(employees::Column::Status.eq(Status::Inactive.as_str()))
            .count(&self.db)
            .await?;

        Ok((active, inactive))
    }
}
