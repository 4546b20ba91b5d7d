use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tg_shared::Pagination;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Company, ReactionKind, Review, ReviewReaction, User};
use crate::domain::value_objects::{
    CompanySummary, RatingSummary, ReviewAuthor, ReviewCompany, ReviewDetails,
};
use crate::errors::DomainError;
use crate::repositories::{
    CompanyFilter, CompanyRepository, ReviewFilter, ReviewRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    companies: HashMap<Uuid, Company>,
    reviews: HashMap<Uuid, Review>,
    reactions: HashMap<(Uuid, Uuid, ReactionKind), ReviewReaction>,
}

impl Tables {
    fn remove_reviews_where(&mut self, predicate: impl Fn(&Review) -> bool) {
        let doomed: HashSet<Uuid> = self
            .reviews
            .values()
            .filter(|review| predicate(review))
            .map(|review| review.id)
            .collect();
        self.reviews.retain(|id, _| !doomed.contains(id));
        self.reactions
            .retain(|(review_id, _, _), _| !doomed.contains(review_id));
    }

    fn reaction_count(&self, review_id: Uuid, kind: ReactionKind) -> u64 {
        self.reactions
            .keys()
            .filter(|(id, _, k)| *id == review_id && *k == kind)
            .count() as u64
    }

    fn reviews_by(&self, user_id: Uuid) -> u64 {
        self.reviews.values().filter(|r| r.user_id == user_id).count() as u64
    }

    fn rating_summary(&self, company_id: Uuid) -> RatingSummary {
        let ratings: Vec<u8> = self
            .reviews
            .values()
            .filter(|r| r.company_id == company_id)
            .map(|r| r.rating)
            .collect();
        RatingSummary::from_ratings(&ratings)
    }

    fn details(&self, review: &Review) -> Option<ReviewDetails> {
        let user = self.users.get(&review.user_id)?;
        let company = self.companies.get(&review.company_id)?;
        Some(ReviewDetails {
            review: review.clone(),
            author: ReviewAuthor {
                user_id: user.id,
                name: user.name.clone(),
                country: user.country.clone(),
                number_of_reviews: self.reviews_by(user.id),
            },
            company: ReviewCompany {
                company_id: company.id,
                company_name: company.company_name.clone(),
                company_website: company.website.clone(),
            },
            like_count: self.reaction_count(review.id, ReactionKind::Like),
            flag_count: self.reaction_count(review.id, ReactionKind::Flag),
        })
    }
}

fn page<T>(items: Vec<T>, pagination: Pagination) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let page = items
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect();
    (page, total)
}

/// Users, companies, reviews and reactions held in process memory
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::duplicate("email"));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::not_found("user"));
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(DomainError::duplicate("email"));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.remove_reviews_where(|review| review.user_id == id);
        tables.reactions.retain(|(_, user_id, _), _| *user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn find_by_website(&self, website: &str) -> Result<Option<Company>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .values()
            .find(|c| c.website == website)
            .cloned())
    }

    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.companies.values().any(|c| c.website == company.website) {
            return Err(DomainError::duplicate("website"));
        }
        tables.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.companies.remove(&id).is_none() {
            return Ok(false);
        }
        tables.remove_reviews_where(|review| review.company_id == id);
        Ok(true)
    }

    async fn summary(&self, id: Uuid) -> Result<Option<CompanySummary>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .get(&id)
            .map(|company| CompanySummary::new(company.clone(), tables.rating_summary(id))))
    }

    async fn list_summaries(
        &self,
        filter: &CompanyFilter,
        pagination: Pagination,
    ) -> Result<(Vec<CompanySummary>, u64), DomainError> {
        let tables = self.tables.read().await;
        let mut summaries: Vec<CompanySummary> = tables
            .companies
            .values()
            .filter(|c| filter.category.as_ref().map_or(true, |v| &c.category == v))
            .filter(|c| filter.subcategory.as_ref().map_or(true, |v| &c.subcategory == v))
            .map(|c| CompanySummary::new(c.clone(), tables.rating_summary(c.id)))
            .collect();
        summaries.sort_by(|a, b| {
            b.rating
                .average_rating
                .total_cmp(&a.rating.average_rating)
                .then_with(|| b.company.created_at.cmp(&a.company.created_at))
                .then_with(|| a.company.id.cmp(&b.company.id))
        });
        Ok(page(summaries, pagination))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        Ok(self.tables.read().await.reviews.get(&id).cloned())
    }

    async fn find_details(&self, id: Uuid) -> Result<Option<ReviewDetails>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.get(&id).and_then(|review| tables.details(review)))
    }

    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&review.user_id) {
            return Err(DomainError::not_found("user"));
        }
        if !tables.companies.contains_key(&review.company_id) {
            return Err(DomainError::not_found("company"));
        }
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.reviews.get_mut(&review.id) {
            Some(existing) => {
                *existing = review.clone();
                Ok(review)
            }
            None => Err(DomainError::not_found("review")),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let existed = tables.reviews.contains_key(&id);
        tables.remove_reviews_where(|review| review.id == id);
        Ok(existed)
    }

    async fn list(
        &self,
        filter: &ReviewFilter,
        pagination: Pagination,
    ) -> Result<(Vec<ReviewDetails>, u64), DomainError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<&Review> = tables
            .reviews
            .values()
            .filter(|r| filter.user_id.map_or(true, |id| r.user_id == id))
            .filter(|r| filter.company_id.map_or(true, |id| r.company_id == id))
            .filter(|r| {
                filter.subcategory.as_ref().map_or(true, |sub| {
                    tables
                        .companies
                        .get(&r.company_id)
                        .is_some_and(|c| &c.subcategory == sub)
                })
            })
            .collect();
        reviews.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let details = reviews
            .into_iter()
            .filter_map(|review| tables.details(review))
            .collect();
        Ok(page(details, pagination))
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        Ok(self.tables.read().await.reviews_by(user_id))
    }

    async fn add_reaction(&self, reaction: ReviewReaction) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.reviews.contains_key(&reaction.review_id) {
            return Err(DomainError::not_found("review"));
        }
        let key = (reaction.review_id, reaction.user_id, reaction.kind);
        if tables.reactions.contains_key(&key) {
            return Err(DomainError::duplicate(reaction.kind.as_str()));
        }
        tables.reactions.insert(key, reaction);
        Ok(())
    }
}
