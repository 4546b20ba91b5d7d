use std::sync::Arc;
use tg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::ReviewChanges;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{InMemoryStore, ReviewFilter};
use crate::services::fixtures::{new_review, seed_company, seed_user};
use crate::services::review::ReviewService;

fn service(store: &InMemoryStore) -> ReviewService {
    ReviewService::new(Arc::new(store.clone()), Arc::new(store.clone()))
}

#[tokio::test]
async fn test_submit_returns_details() {
    let store = InMemoryStore::new();
    let reviews = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let acme = seed_company(&store, "acme.com").await;

    let details = reviews.submit(ada.id, new_review(acme.id, 4)).await.unwrap();
    assert_eq!(details.review.rating, 4);
    assert_eq!(details.author.user_id, ada.id);
    assert_eq!(details.author.number_of_reviews, 1);
    assert_eq!(details.company.company_website, "acme.com");
    assert_eq!(details.like_count, 0);
    assert_eq!(details.flag_count, 0);
}

#[tokio::test]
async fn test_submit_unknown_company_not_found() {
    let store = InMemoryStore::new();
    let ada = seed_user(&store, "ada@x.com").await;
    let err = service(&store)
        .submit(ada.id, new_review(Uuid::new_v4(), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_submit_rejects_out_of_range_rating() {
    let store = InMemoryStore::new();
    let reviews = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let acme = seed_company(&store, "acme.com").await;

    for rating in [0, 6] {
        let err = reviews
            .submit(ada.id, new_review(acme.id, rating))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::OutOfRange { .. })
        ));
    }
}

#[tokio::test]
async fn test_update_and_delete_owner_only() {
    let store = InMemoryStore::new();
    let reviews = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let bob = seed_user(&store, "bob@x.com").await;
    let acme = seed_company(&store, "acme.com").await;
    let review = reviews.submit(ada.id, new_review(acme.id, 4)).await.unwrap();
    let id = review.review.id;

    let changes = ReviewChanges {
        rating: Some(2),
        ..Default::default()
    };
    let err = reviews.update(bob.id, id, changes.clone()).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::PermissionDenied)));
    let err = reviews.delete(bob.id, id).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::PermissionDenied)));

    let updated = reviews.update(ada.id, id, changes).await.unwrap();
    assert_eq!(updated.review.rating, 2);
    assert!(updated.review.updated_at >= review.review.updated_at);

    reviews.delete(ada.id, id).await.unwrap();
    assert!(matches!(
        reviews.get(id).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_like_and_flag_once_per_user() {
    let store = InMemoryStore::new();
    let reviews = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let bob = seed_user(&store, "bob@x.com").await;
    let acme = seed_company(&store, "acme.com").await;
    let id = reviews
        .submit(ada.id, new_review(acme.id, 4))
        .await
        .unwrap()
        .review
        .id;

    assert_eq!(reviews.like(bob.id, id).await.unwrap().like_count, 1);
    let err = reviews.like(bob.id, id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::DuplicateValue { .. })
    ));
    assert_eq!(reviews.like(ada.id, id).await.unwrap().like_count, 2);

    let flagged = reviews.flag(bob.id, id).await.unwrap();
    assert_eq!(flagged.flag_count, 1);
    assert_eq!(flagged.like_count, 2);
    assert!(reviews.flag(bob.id, id).await.is_err());

    let err = reviews.like(bob.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_filters_by_company() {
    let store = InMemoryStore::new();
    let reviews = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let acme = seed_company(&store, "acme.com").await;
    let bolt = seed_company(&store, "bolt.com").await;
    reviews.submit(ada.id, new_review(acme.id, 4)).await.unwrap();
    reviews.submit(ada.id, new_review(bolt.id, 1)).await.unwrap();

    let all = reviews
        .list(ReviewFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);

    let acme_only = reviews
        .list(
            ReviewFilter {
                company_id: Some(acme.id),
                ..Default::default()
            },
            Pagination::new(1, 1),
        )
        .await
        .unwrap();
    assert_eq!(acme_only.total, 1);
    assert_eq!(acme_only.items[0].company.company_id, acme.id);
    assert!(!acme_only.has_next);
}
