use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entity::{genre, genre_title, title};
use crate::error::{AppError, AppResult};

#[derive(Clone, Debug, Default)]
pub struct NewTitle {
    pub name: String,
    pub year: u16,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

/// Inserts the title and its genre links in one transaction.
pub async fn create(db: &DatabaseConnection, new: NewTitle) -> AppResult<title::Model> {
    let txn = db.begin().await?;
    let active = title::ActiveModel {
        name: Set(new.name),
        year: Set(new.year),
        description: Set(new.description),
        category_id: Set(new.category_id),
        ..Default::default()
    };
    let created = match insert_with_genres(&txn, active, &new.genre_ids).await {
        Ok(created) => created,
        Err(err) => {
            txn.rollback().await?;
            return Err(err);
        }
    };
    txn.commit().await?;
    debug!("title {} ({}) created with {} genre(s)", created.name, created.year, new.genre_ids.len());
    Ok(created)
}

async fn insert_with_genres(
    txn: &DatabaseTransaction,
    active: title::ActiveModel,
    genre_ids: &[i32],
) -> AppResult<title::Model> {
    let created = active.insert(txn).await?;
    link_genres(txn, created.id, genre_ids).await?;
    Ok(created)
}

pub async fn link_genres<C: ConnectionTrait>(db: &C, title_id: i32, genre_ids: &[i32]) -> AppResult<()> {
    for genre_id in genre_ids {
        let link = genre_title::ActiveModel {
            genre_id: Set(*genre_id),
            title_id: Set(title_id),
            ..Default::default()
        };
        link.insert(db).await?;
    }
    Ok(())
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<title::Model> {
    title::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("title {}", id)))
}

pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<title::Model>> {
    Ok(title::Entity::find_ordered().all(db).await?)
}

pub async fn list_in_category<C: ConnectionTrait>(db: &C, category_id: i32) -> AppResult<Vec<title::Model>> {
    Ok(title::Entity::find_ordered()
        .filter(title::Column::CategoryId.eq(category_id))
        .all(db)
        .await?)
}

pub async fn genres_of<C: ConnectionTrait>(db: &C, title_id: i32) -> AppResult<Vec<genre::Model>> {
    let model = find(db, title_id).await?;
    Ok(model
        .find_related(genre::Entity)
        .order_by_desc(genre::Column::Name)
        .all(db)
        .await?)
}

pub async fn set_category<C: ConnectionTrait>(
    db: &C,
    title_id: i32,
    category_id: Option<i32>,
) -> AppResult<title::Model> {
    let mut active: title::ActiveModel = find(db, title_id).await?.into();
    active.category_id = Set(category_id);
    Ok(active.update(db).await?)
}

/// Reviews, their comments and the genre links go with the title.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<()> {
    let res = title::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found(format!("title {}", id)));
    }
    Ok(())
}
