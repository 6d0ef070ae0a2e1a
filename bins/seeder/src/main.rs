//! Database seeder for Staffly development and testing.
//!
//! Seeds the initial Super Admin account and a sample employee so a fresh
//! install is immediately usable.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use staffly_core::auth::hash_password;
use staffly_db::entities::{employees, users};
use staffly_shared::types::{Role, Status};

/// Super Admin ID (consistent for all seeds)
const SUPER_ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";

const SUPER_ADMIN_EMAIL: &str = "admin@staffly.dev";
const SUPER_ADMIN_PASSWORD: &str = "change-me-after-first-login";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = staffly_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding Super Admin account...");
    seed_super_admin(&db).await;

    println!("Seeding sample employee...");
    seed_sample_employee(&db).await;

    println!("Seeding complete!");
}

fn super_admin_id() -> Uuid {
    Uuid::parse_str(SUPER_ADMIN_ID).unwrap()
}

/// Seeds the initial Super Admin account.
async fn seed_super_admin(db: &DatabaseConnection) {
    if users::Entity::find_by_id(super_admin_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Super Admin already exists, skipping...");
        return;
    }

    let password_hash = hash_password(SUPER_ADMIN_PASSWORD).expect("Failed to hash password");

    let user = users::ActiveModel {
        id: Set(super_admin_id()),
        full_name: Set("Staffly Admin".to_string()),
        email: Set(SUPER_ADMIN_EMAIL.to_string()),
        password_hash: Set(password_hash),
        role: Set(Role::SuperAdmin.as_str().to_string()),
        status: Set(Status::Active.as_str().to_string()),
        created_on: Set(chrono::Utc::now().date_naive()),
    };

    user.insert(db).await.expect("Failed to seed Super Admin");
    println!("  Super Admin seeded ({SUPER_ADMIN_EMAIL})");
}

/// Seeds one sample employee with a linked account.
async fn seed_sample_employee(db: &DatabaseConnection) {
    let email = "asha.verma@staffly.dev";

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Sample employee already exists, skipping...");
        return;
    }

    let dob = NaiveDate::from_ymd_opt(1994, 3, 12).unwrap();
    // New employee accounts start with the date of birth as the password.
    let password_hash =
        hash_password(&dob.format("%Y-%m-%d").to_string()).expect("Failed to hash password");

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set("Asha Verma".to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        role: Set(Role::Employee.as_str().to_string()),
        status: Set(Status::Active.as_str().to_string()),
        created_on: Set(chrono::Utc::now().date_naive()),
    };
    let user = user.insert(db).await.expect("Failed to seed sample user");

    let employee = employees::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        phone: Set("+91-9876543210".to_string()),
        department: Set("Engineering".to_string()),
        designation: Set("Software Engineer".to_string()),
        salary: Set(Some(Decimal::new(50_000_00, 2))),
        hire_date: Set(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()),
        dob: Set(dob),
        status: Set(Status::Active.as_str().to_string()),
        id_proof: Set(None),
    };
    employee
        .insert(db)
        .await
        .expect("Failed to seed sample employee");

    println!("  Sample employee seeded ({email})");
}
