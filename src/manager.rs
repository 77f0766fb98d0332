//! Account creation.
//!
//! [`UserManager`] validates the input, normalizes the email, issues a
//! confirmation code, hashes the password and mails the code to the new
//! account. The row and the mail succeed or fail together: the insert runs in
//! a transaction that is only committed once the mail has been handed off.

use log::info;
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, Set, TransactionTrait};

use crate::entity::user::{self, Role};
use crate::error::{AppError, AppResult};
use crate::mail::Mailer;

pub const CODE_LENGTH: usize = 64;
pub const USERNAME_MAX_LENGTH: usize = 150;
pub const CONFIRMATION_SUBJECT: &str = "confirmation_code";

// no 0/O, 1/l/I
const CODE_ALPHABET: &[u8] = b"abcdefghjkmnpqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789";

#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub bio: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }
}

pub struct UserManager<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a dyn Mailer,
    bcrypt_cost: u32,
}

impl<'a> UserManager<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a dyn Mailer) -> Self {
        Self {
            db,
            mailer,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub async fn create_user(&self, new: NewUser) -> AppResult<user::Model> {
        self.create(new, false).await
    }

    pub async fn create_superuser(&self, mut new: NewUser) -> AppResult<user::Model> {
        if new.password.as_deref().map_or(true, str::is_empty) {
            return Err(AppError::param_error("Superusers must have a password."));
        }
        new.role.get_or_insert(Role::Admin);
        self.create(new, true).await
    }

    /// Blank or missing passwords leave the account without a usable password.
    pub fn hash_password(&self, raw: Option<&str>) -> AppResult<String> {
        match raw {
            Some(raw) if !raw.is_empty() => Ok(bcrypt::hash(raw, self.bcrypt_cost)?),
            _ => Ok(String::new()),
        }
    }

    pub async fn set_password(&self, username: &str, raw: Option<&str>) -> AppResult<user::Model> {
        let password = self.hash_password(raw)?;
        let active = user::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password),
            ..Default::default()
        };
        active.update(self.db).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => AppError::not_found(format!("user {}", username)),
            err => err.into(),
        })
    }

    async fn create(&self, new: NewUser, superuser: bool) -> AppResult<user::Model> {
        let username = required(new.username, "Users must have a username.")?;
        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::param_error(format!(
                "Username must be at most {} characters.",
                USERNAME_MAX_LENGTH
            )));
        }
        let email = normalize_email(&required(new.email, "Users must have an email address.")?);
        let password = self.hash_password(new.password.as_deref())?;
        let role = new.role.unwrap_or_default();
        let confirmation_code = make_confirmation_code();

        let active = user::ActiveModel {
            username: Set(username),
            email: Set(email),
            password: Set(password),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            bio: Set(new.bio),
            role: Set(role),
            confirmation_code: Set(confirmation_code),
            is_staff: Set(false),
            is_superuser: Set(false),
            is_active: Set(true),
            last_login: Set(None),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let created = match self.insert_and_notify(&txn, active, superuser).await {
            Ok(created) => created,
            Err(err) => {
                txn.rollback().await?;
                return Err(err);
            }
        };
        txn.commit().await?;

        info!("created {} account {}", created.role, created.username);
        Ok(created)
    }

    async fn insert_and_notify(
        &self,
        txn: &DatabaseTransaction,
        active: user::ActiveModel,
        superuser: bool,
    ) -> AppResult<user::Model> {
        let mut created = active.insert(txn).await?;
        if superuser {
            created = elevate(txn, created).await?;
        }
        self.mailer
            .send_to(&created.email, CONFIRMATION_SUBJECT, &created.confirmation_code)
            .await?;
        Ok(created)
    }
}

async fn elevate(txn: &DatabaseTransaction, model: user::Model) -> AppResult<user::Model> {
    let mut active: user::ActiveModel = model.into();
    active.is_superuser = Set(true);
    active.is_staff = Set(true);
    active.is_active = Set(true);
    Ok(active.update(txn).await?)
}

fn required(value: Option<String>, msg: &str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::param_error(msg))
}

/// Lowercases the domain part; the local part is left alone since mail
/// servers may treat it case-sensitively.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub fn make_confirmation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
