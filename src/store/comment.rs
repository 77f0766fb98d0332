use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entity::comment;
use crate::error::{AppError, AppResult};

pub async fn create<C: ConnectionTrait>(
    db: &C,
    review_id: i32,
    author: &str,
    text: &str,
) -> AppResult<comment::Model> {
    let active = comment::ActiveModel {
        review_id: Set(review_id),
        author: Set(author.to_string()),
        text: Set(text.to_string()),
        ..Default::default()
    };
    Ok(active.insert(db).await?)
}

pub async fn list_for_review<C: ConnectionTrait>(db: &C, review_id: i32) -> AppResult<Vec<comment::Model>> {
    Ok(comment::Entity::find_ordered()
        .filter(comment::Column::ReviewId.eq(review_id))
        .all(db)
        .await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<()> {
    let res = comment::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found(format!("comment {}", id)));
    }
    Ok(())
}
