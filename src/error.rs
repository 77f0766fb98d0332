use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("mail delivery failed: {0}")]
    Mail(String),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("database error: {0}")]
    Db(DbErr),
}

impl AppError {
    pub fn param_error(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Validation(_) => 1,
            Self::Constraint(_) => 2,
            Self::NotFound(_) => 3,
            Self::Mail(_) => 4,
            Self::Hash(_) | Self::Db(_) => 99,
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Constraint(msg),
            _ => {
                // sqlite drivers don't always carry an extended code
                let msg = err.to_string();
                if msg.contains("UNIQUE") || msg.contains("Duplicate") || msg.contains("FOREIGN KEY") {
                    Self::Constraint(msg)
                } else {
                    Self::Db(err)
                }
            }
        }
    }
}
