use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entity::category;
use crate::error::{AppError, AppResult};
use crate::store::validate_slug;

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, slug: &str) -> AppResult<category::Model> {
    validate_slug(slug)?;
    let active = category::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        ..Default::default()
    };
    Ok(active.insert(db).await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<category::Model>> {
    Ok(category::Entity::find_ordered().all(db).await?)
}

pub async fn find_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<Option<category::Model>> {
    Ok(category::Entity::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await?)
}

/// Titles in the category survive with their category cleared.
pub async fn delete_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<()> {
    let res = category::Entity::delete_many()
        .filter(category::Column::Slug.eq(slug))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found(format!("category {}", slug)));
    }
    Ok(())
}
