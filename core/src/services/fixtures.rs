//! Seed data shared by service tests

use uuid::Uuid;

use crate::domain::entities::{Company, NewCompany, NewReview, NewUser, Review, User};
use crate::repositories::{CompanyRepository, InMemoryStore, ReviewRepository, UserRepository};

pub async fn seed_user(store: &InMemoryStore, email: &str) -> User {
    let user = User::new(NewUser {
        email: email.to_string(),
        name: "Ada".to_string(),
        country: "NG".to_string(),
        language: "en".to_string(),
    });
    UserRepository::create(store, user).await.unwrap()
}

pub fn new_company(website: &str, subcategory: &str) -> NewCompany {
    NewCompany {
        company_name: format!("Company {}", website),
        category: "Home Services".to_string(),
        subcategory: subcategory.to_string(),
        country: "NG".to_string(),
        website: website.to_string(),
        ..Default::default()
    }
}

pub async fn seed_company(store: &InMemoryStore, website: &str) -> Company {
    let company = Company::new(new_company(website, "Roofing"));
    CompanyRepository::create(store, company).await.unwrap()
}

pub fn new_review(company_id: Uuid, rating: u8) -> NewReview {
    NewReview {
        company_id,
        rating,
        title: "Solid work".to_string(),
        body: "Arrived on time and fixed the leak.".to_string(),
    }
}

pub async fn seed_review(store: &InMemoryStore, user_id: Uuid, company_id: Uuid, rating: u8) -> Review {
    let review = Review::new(user_id, new_review(company_id, rating));
    ReviewRepository::create(store, review).await.unwrap()
}
