use std::sync::Arc;
use tg_shared::Pagination;
use uuid::Uuid;

use crate::errors::{DomainError, ValidationError};
use crate::repositories::{CompanyFilter, CompanyRepository, InMemoryStore};
use crate::services::company::CompanyService;
use crate::services::fixtures::{new_company, seed_company, seed_review, seed_user};

fn service(store: &InMemoryStore) -> CompanyService {
    CompanyService::new(Arc::new(store.clone()), Arc::new(store.clone()))
}

#[tokio::test]
async fn test_register_normalizes_and_derives_claim() {
    let store = InMemoryStore::new();
    let companies = service(&store);

    let unclaimed = companies
        .register(new_company("acme.com", "Roof Repair"))
        .await
        .unwrap();
    assert!(!unclaimed.company.is_claimed);
    assert_eq!(unclaimed.company.category, "home_services");
    assert_eq!(unclaimed.company.subcategory, "roof_repair");
    assert_eq!(unclaimed.rating.number_of_reviews, 0);
    assert_eq!(unclaimed.rating.average_rating, 0.0);

    let mut input = new_company("bolt.com", "Plumbing");
    input.work_email = "owner@bolt.com".to_string();
    let claimed = companies.register(input).await.unwrap();
    assert!(claimed.company.is_claimed);
}

#[tokio::test]
async fn test_register_rejects_duplicate_website() {
    let store = InMemoryStore::new();
    let companies = service(&store);
    companies.register(new_company("acme.com", "")).await.unwrap();

    let err = companies
        .register(new_company("acme.com", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::DuplicateValue { field }) if field == "website"
    ));
}

#[tokio::test]
async fn test_register_rejects_bad_work_email() {
    let store = InMemoryStore::new();
    let mut input = new_company("acme.com", "");
    input.work_email = "not-an-email".to_string();
    let err = service(&store).register(input).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::InvalidFormat { .. })
    ));
}

#[tokio::test]
async fn test_summary_averages_ratings() {
    let store = InMemoryStore::new();
    let companies = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let acme = seed_company(&store, "acme.com").await;
    seed_review(&store, ada.id, acme.id, 4).await;
    seed_review(&store, ada.id, acme.id, 5).await;

    let summary = companies.get(acme.id).await.unwrap();
    assert_eq!(summary.rating.number_of_reviews, 2);
    assert_eq!(summary.rating.average_rating, 4.5);

    assert!(matches!(
        companies.get(Uuid::new_v4()).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_list_orders_by_average_and_filters() {
    let store = InMemoryStore::new();
    let companies = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let low = seed_company(&store, "low.com").await;
    let high = seed_company(&store, "high.com").await;
    let plumber = companies
        .register(new_company("pipes.com", "Plumbing"))
        .await
        .unwrap();
    seed_review(&store, ada.id, low.id, 2).await;
    seed_review(&store, ada.id, high.id, 5).await;

    let page = companies
        .list(CompanyFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items[0].company.id, high.id);
    assert_eq!(page.items[1].company.id, low.id);

    let filtered = companies
        .list(
            CompanyFilter {
                category: Some("Home Services".to_string()),
                subcategory: Some("plumbing".to_string()),
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.items[0].company.id, plumber.company.id);
}

#[tokio::test]
async fn test_reviews_for_website() {
    let store = InMemoryStore::new();
    let companies = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let acme = seed_company(&store, "acme.com").await;
    seed_review(&store, ada.id, acme.id, 3).await;

    let found = companies
        .reviews_for_website("acme.com", None, Pagination::default())
        .await
        .unwrap();
    assert_eq!(found.company.unwrap().company.id, acme.id);
    assert_eq!(found.reviews.total, 1);

    let missing = companies
        .reviews_for_website("nobody.com", None, Pagination::default())
        .await
        .unwrap();
    assert!(missing.company.is_none());
    assert!(missing.reviews.items.is_empty());
}

#[tokio::test]
async fn test_delete_company_cascades_reviews() {
    let store = InMemoryStore::new();
    let companies = service(&store);
    let ada = seed_user(&store, "ada@x.com").await;
    let acme = seed_company(&store, "acme.com").await;
    seed_review(&store, ada.id, acme.id, 3).await;

    assert!(CompanyRepository::delete(&store, acme.id).await.unwrap());
    let profile_reviews = crate::services::user::UserService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    )
    .list_reviews(ada.id, Pagination::default())
    .await
    .unwrap();
    assert_eq!(profile_reviews.total, 0);
    assert!(companies.get(acme.id).await.is_err());
}
