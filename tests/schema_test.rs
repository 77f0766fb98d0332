mod common;

use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, Set};

use yamdb_models::entity::user::Role;
use yamdb_models::entity::{comment, genre_title, review, title};
use yamdb_models::store;
use yamdb_models::store::title::NewTitle;
use yamdb_models::AppError;

use common::{insert_user, setup_db};

async fn seed_title(db: &DatabaseConnection, name: &str, year: u16, genre_ids: Vec<i32>) -> title::Model {
    store::title::create(
        db,
        NewTitle {
            name: name.to_string(),
            year,
            genre_ids,
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_duplicate_title_name_and_year_rejected() {
    let db = setup_db().await;
    seed_title(&db, "Solaris", 1972, vec![]).await;

    let err = store::title::create(
        &db,
        NewTitle {
            name: "Solaris".to_string(),
            year: 1972,
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err:?}");

    // same name in another year is a different title
    seed_title(&db, "Solaris", 2002, vec![]).await;
    assert_eq!(store::title::list(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_second_review_by_same_author_rejected() {
    let db = setup_db().await;
    insert_user(&db, "reader", Utc::now()).await;
    insert_user(&db, "critic", Utc::now()).await;
    let solaris = seed_title(&db, "Solaris", 1972, vec![]).await;

    store::review::create(&db, solaris.id, "reader", 9, "slow and great").await.unwrap();
    let err = store::review::create(&db, solaris.id, "reader", 3, "changed my mind")
        .await
        .unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err:?}");

    store::review::create(&db, solaris.id, "critic", 7, "long").await.unwrap();
    assert_eq!(store::review::list_for_title(&db, solaris.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_review_for_missing_title_violates_foreign_key() {
    let db = setup_db().await;
    insert_user(&db, "reader", Utc::now()).await;

    let err = store::review::create(&db, 404, "reader", 5, "ghost").await.unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_deleting_category_keeps_titles() {
    let db = setup_db().await;
    let films = store::category::create(&db, "Films", "films").await.unwrap();
    let created = store::title::create(
        &db,
        NewTitle {
            name: "Stalker".to_string(),
            year: 1979,
            category_id: Some(films.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(store::title::list_in_category(&db, films.id).await.unwrap().len(), 1);

    store::category::delete_by_slug(&db, "films").await.unwrap();

    let survivor = store::title::find(&db, created.id).await.unwrap();
    assert_eq!(survivor.category_id, None);
    assert!(store::category::find_by_slug(&db, "films").await.unwrap().is_none());
}

#[tokio::test]
async fn test_deleting_title_cascades_to_reviews_comments_and_links() {
    let db = setup_db().await;
    insert_user(&db, "reader", Utc::now()).await;
    let drama = store::genre::create(&db, "Drama", "drama").await.unwrap();
    let scifi = store::genre::create(&db, "Sci-Fi", "sci-fi").await.unwrap();
    let solaris = seed_title(&db, "Solaris", 1972, vec![drama.id, scifi.id]).await;
    let review = store::review::create(&db, solaris.id, "reader", 9, "great").await.unwrap();
    store::comment::create(&db, review.id, "reader", "agreed").await.unwrap();

    store::title::delete(&db, solaris.id).await.unwrap();

    assert_eq!(review::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(comment::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(genre_title::Entity::find().count(&db).await.unwrap(), 0);
    // genres themselves stay
    assert_eq!(store::genre::list(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_review_cascades_to_comments() {
    let db = setup_db().await;
    insert_user(&db, "reader", Utc::now()).await;
    let solaris = seed_title(&db, "Solaris", 1972, vec![]).await;
    let review = store::review::create(&db, solaris.id, "reader", 9, "great").await.unwrap();
    store::comment::create(&db, review.id, "reader", "first").await.unwrap();
    store::comment::create(&db, review.id, "reader", "second").await.unwrap();

    store::review::delete(&db, review.id).await.unwrap();

    assert!(store::comment::list_for_review(&db, review.id).await.unwrap().is_empty());
    assert!(store::title::find(&db, solaris.id).await.is_ok());
}

#[tokio::test]
async fn test_deleting_genre_drops_links_only() {
    let db = setup_db().await;
    let drama = store::genre::create(&db, "Drama", "drama").await.unwrap();
    let solaris = seed_title(&db, "Solaris", 1972, vec![drama.id]).await;

    store::genre::delete_by_slug(&db, "drama").await.unwrap();

    assert!(store::title::genres_of(&db, solaris.id).await.unwrap().is_empty());
    assert!(store::title::find(&db, solaris.id).await.is_ok());
}

#[tokio::test]
async fn test_deleting_user_cascades_to_reviews_and_comments() {
    let db = setup_db().await;
    insert_user(&db, "reader", Utc::now()).await;
    let solaris = seed_title(&db, "Solaris", 1972, vec![]).await;
    let review = store::review::create(&db, solaris.id, "reader", 9, "great").await.unwrap();
    store::comment::create(&db, review.id, "reader", "agreed").await.unwrap();

    store::user::delete(&db, "reader").await.unwrap();

    assert_eq!(review::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(comment::Entity::find().count(&db).await.unwrap(), 0);
    assert!(matches!(
        store::user::delete(&db, "reader").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_title_genres_follow_join_table() {
    let db = setup_db().await;
    let drama = store::genre::create(&db, "Drama", "drama").await.unwrap();
    let scifi = store::genre::create(&db, "Sci-Fi", "sci-fi").await.unwrap();
    store::genre::create(&db, "Comedy", "comedy").await.unwrap();
    let solaris = seed_title(&db, "Solaris", 1972, vec![drama.id, scifi.id]).await;

    let names: Vec<String> = store::title::genres_of(&db, solaris.id)
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Sci-Fi", "Drama"]);

    let titles = drama.find_related(title::Entity).all(&db).await.unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].id, solaris.id);
}

#[tokio::test]
async fn test_title_with_unknown_genre_is_rolled_back() {
    let db = setup_db().await;

    let err = store::title::create(
        &db,
        NewTitle {
            name: "Solaris".to_string(),
            year: 1972,
            genre_ids: vec![999],
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err:?}");
    assert!(store::title::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_slug_and_bad_slug_rejected() {
    let db = setup_db().await;
    store::category::create(&db, "Books", "books").await.unwrap();

    let err = store::category::create(&db, "More books", "books").await.unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err:?}");

    let err = store::genre::create(&db, "Bad", "not a slug").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_default_orderings() {
    let db = setup_db().await;

    let base = Utc.with_ymd_and_hms(2022, 7, 17, 12, 0, 0).unwrap();
    insert_user(&db, "early", base).await;
    insert_user(&db, "late", base + Duration::days(2)).await;
    insert_user(&db, "middle", base + Duration::days(1)).await;
    let users: Vec<String> = store::user::list(&db).await.unwrap().into_iter().map(|u| u.username).collect();
    assert_eq!(users, vec!["late", "middle", "early"]);

    for (name, slug) in [("Books", "books"), ("Music", "music"), ("Films", "films")] {
        store::category::create(&db, name, slug).await.unwrap();
    }
    let categories: Vec<String> = store::category::list(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(categories, vec!["Music", "Films", "Books"]);

    seed_title(&db, "Mirror", 1975, vec![]).await;
    seed_title(&db, "Nostalghia", 1983, vec![]).await;
    let solaris = seed_title(&db, "Solaris", 1972, vec![]).await;
    let years: Vec<u16> = store::title::list(&db).await.unwrap().into_iter().map(|t| t.year).collect();
    assert_eq!(years, vec![1983, 1975, 1972]);

    for (author, offset) in [("early", 0), ("late", 2), ("middle", 1)] {
        review::ActiveModel {
            title_id: Set(solaris.id),
            author: Set(author.to_string()),
            score: Set(5),
            text: Set("text".to_string()),
            pub_date: Set(base + Duration::hours(offset)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }
    let authors: Vec<String> = store::review::list_for_title(&db, solaris.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.author)
        .collect();
    assert_eq!(authors, vec!["late", "middle", "early"]);
}

#[tokio::test]
async fn test_pub_date_set_on_insert() {
    let db = setup_db().await;
    insert_user(&db, "reader", Utc::now()).await;
    let solaris = seed_title(&db, "Solaris", 1972, vec![]).await;

    let before = Utc::now() - Duration::seconds(1);
    let review = store::review::create(&db, solaris.id, "reader", 8, "good").await.unwrap();
    let comment = store::comment::create(&db, review.id, "reader", "yes").await.unwrap();
    assert!(review.pub_date >= before);
    assert!(comment.pub_date >= before);

    let updated = store::review::update(&db, review.id, 10, "better on rewatch").await.unwrap();
    assert_eq!(updated.pub_date, review.pub_date);
    assert_eq!(updated.score, 10);
}

#[tokio::test]
async fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Moderator).unwrap(), "\"moderator\"");
    let role: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Admin);
}
