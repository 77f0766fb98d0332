use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entity::review;
use crate::error::{AppError, AppResult};

/// Fails with a constraint error when `author` already reviewed the title.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    title_id: i32,
    author: &str,
    score: i32,
    text: &str,
) -> AppResult<review::Model> {
    let active = review::ActiveModel {
        title_id: Set(title_id),
        author: Set(author.to_string()),
        score: Set(score),
        text: Set(text.to_string()),
        ..Default::default()
    };
    Ok(active.insert(db).await?)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<review::Model> {
    review::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("review {}", id)))
}

pub async fn list_for_title<C: ConnectionTrait>(db: &C, title_id: i32) -> AppResult<Vec<review::Model>> {
    Ok(review::Entity::find_ordered()
        .filter(review::Column::TitleId.eq(title_id))
        .all(db)
        .await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    score: i32,
    text: &str,
) -> AppResult<review::Model> {
    let mut active: review::ActiveModel = find(db, id).await?.into();
    active.score = Set(score);
    active.text = Set(text.to_string());
    Ok(active.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<()> {
    let res = review::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found(format!("review {}", id)));
    }
    Ok(())
}
