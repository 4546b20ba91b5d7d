//! Route table for `/api/v1`.
//!
//! Every path is registered as a `web::resource` so an unsupported method
//! answers 405 instead of falling through to the 404 handler. Literal
//! segments (`/users/me`, `/companies/reviews`) are registered before the
//! `{id}` patterns they would otherwise collide with.

pub mod auth;
pub mod companies;
pub mod health;
pub mod reviews;
pub mod users;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(user_routes)
            .configure(review_routes)
            .configure(company_routes),
    );
}

fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users/register").route(web::post().to(auth::register)))
        .service(
            web::resource("/users/login/otp").route(web::post().to(auth::request_login_code)),
        )
        .service(web::resource("/users/login").route(web::post().to(auth::login)))
        .service(web::resource("/users/token/refresh").route(web::post().to(auth::refresh)))
        .service(web::resource("/users/me").route(web::get().to(users::me)))
        .service(
            web::resource("/users/{id}/reviews").route(web::get().to(users::list_user_reviews)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(users::get_user))
                .route(web::patch().to(users::update_user))
                .route(web::put().to(users::update_user))
                .route(web::delete().to(users::delete_user)),
        );
}

fn review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/reviews")
            .route(web::get().to(reviews::list_reviews))
            .route(web::post().to(reviews::submit_review)),
    )
    .service(web::resource("/reviews/{id}/like").route(web::post().to(reviews::like_review)))
    .service(web::resource("/reviews/{id}/flag").route(web::post().to(reviews::flag_review)))
    .service(
        web::resource("/reviews/{id}")
            .route(web::get().to(reviews::get_review))
            .route(web::patch().to(reviews::update_review))
            .route(web::put().to(reviews::update_review))
            .route(web::delete().to(reviews::delete_review)),
    );
}

fn company_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/companies")
            .route(web::get().to(companies::list_companies))
            .route(web::post().to(companies::register_company)),
    )
    .service(
        web::resource("/companies/reviews").route(web::get().to(companies::reviews_by_website)),
    )
    .service(
        web::resource("/companies/{id}/reviews")
            .route(web::get().to(companies::company_reviews)),
    )
    .service(web::resource("/companies/{id}").route(web::get().to(companies::get_company)));
}
