#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use yamdb_models::config::AppConfig;
use yamdb_models::db::connect_db;
use yamdb_models::entity::user::{self, Role};
use yamdb_models::mail::MemoryMailer;
use yamdb_models::manager::UserManager;

pub const TEST_COST: u32 = 4;

pub async fn setup_db() -> DatabaseConnection {
    connect_db(&AppConfig::in_memory())
        .await
        .expect("in-memory database")
}

pub fn mailer() -> MemoryMailer {
    MemoryMailer::new("noreply@yamdb.local")
}

pub fn manager<'a>(db: &'a DatabaseConnection, mailer: &'a MemoryMailer) -> UserManager<'a> {
    UserManager::new(db, mailer).with_bcrypt_cost(TEST_COST)
}

/// Inserts a user row directly, bypassing the manager.
pub async fn insert_user(db: &DatabaseConnection, username: &str, joined: DateTime<Utc>) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
        password: Set(String::new()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        bio: Set(String::new()),
        role: Set(Role::User),
        confirmation_code: Set("code".to_string()),
        is_staff: Set(false),
        is_superuser: Set(false),
        is_active: Set(true),
        last_login: Set(None),
        date_joined: Set(joined),
    }
    .insert(db)
    .await
    .expect("insert user")
}
