use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entity::genre;
use crate::error::{AppError, AppResult};
use crate::store::validate_slug;

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, slug: &str) -> AppResult<genre::Model> {
    validate_slug(slug)?;
    let active = genre::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        ..Default::default()
    };
    Ok(active.insert(db).await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<genre::Model>> {
    Ok(genre::Entity::find_ordered().all(db).await?)
}

pub async fn find_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<Option<genre::Model>> {
    Ok(genre::Entity::find()
        .filter(genre::Column::Slug.eq(slug))
        .one(db)
        .await?)
}

/// Drops the genre together with its title links.
pub async fn delete_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<()> {
    let res = genre::Entity::delete_many()
        .filter(genre::Column::Slug.eq(slug))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found(format!("genre {}", slug)));
    }
    Ok(())
}
