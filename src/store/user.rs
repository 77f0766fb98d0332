use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entity::user;
use crate::error::{AppError, AppResult};

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<Option<user::Model>> {
    Ok(user::Entity::find_by_id(username.to_string()).one(db).await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<user::Model>> {
    Ok(user::Entity::find_ordered().all(db).await?)
}

/// Removes the account along with its reviews and comments.
pub async fn delete<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<()> {
    let res = user::Entity::delete_by_id(username.to_string()).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found(format!("user {}", username)));
    }
    Ok(())
}
