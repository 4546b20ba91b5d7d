// End-to-end tests for the account, review and reaction flows

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use tg_api::create_app;
use tg_core::NewUser;

use common::{bearer, TestContext};

#[actix_rt::test]
async fn test_register_login_review_and_list() {
    let ctx = TestContext::new();
    let company_id = ctx.company("Acme Roofing", "acme.example").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({"email": "a@x.com", "name": "Ada", "country": "NG", "language": "en"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();
    let code = body["data"]["otp"]["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 4);
    assert_eq!(ctx.mailer.message_count(), 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "a@x.com", "otp": code}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews")
        .insert_header(bearer(&token))
        .set_json(json!({
            "company": company_id,
            "rating": 4,
            "title": "On time",
            "review_body": "Fixed the roof in a day."
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["user"]["number_of_reviews"], 1);
    assert_eq!(body["data"]["company"]["company_website"], "acme.example");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}/reviews", user_id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "On time");
    assert_eq!(body["data"]["items"][0]["like_count"], 0);
    assert_eq!(body["data"]["items"][0]["flag_count"], 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["number_of_reviews"], 1);
}

#[actix_rt::test]
async fn test_login_code_is_single_use() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({"email": "b@x.com", "name": "Bo", "country": "GH", "language": "en"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let code = body["data"]["otp"]["code"].as_str().unwrap().to_string();

    let login = || {
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({"email": "b@x.com", "otp": code}))
            .to_request()
    };
    let res = test::call_service(&app, login()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(&app, login()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
    assert_eq!(body["error"]["message"], "invalid otp");
}

#[actix_rt::test]
async fn test_wrong_length_code_is_an_invalid_credential() {
    let ctx = TestContext::new();
    ctx.signed_in("d@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    for otp in ["12345", ""] {
        let req = test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({"email": "d@x.com", "otp": otp}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
        assert_eq!(body["error"]["message"], "invalid otp");
    }
}

#[actix_rt::test]
async fn test_concurrent_logins_share_one_code() {
    let ctx = TestContext::new();
    let registration = ctx
        .state
        .auth
        .register(NewUser {
            email: "c@x.com".to_string(),
            name: "Cy".to_string(),
            country: "NG".to_string(),
            language: "en".to_string(),
        })
        .await
        .unwrap();
    let code = registration.otp.code.unwrap();

    let (first, second) = futures_util::join!(
        ctx.state.auth.login("c@x.com", &code),
        ctx.state.auth.login("c@x.com", &code)
    );
    let sessions = [first.is_ok(), second.is_ok()]
        .into_iter()
        .filter(|ok| *ok)
        .count();
    assert_eq!(sessions, 1);
}

#[actix_rt::test]
async fn test_login_does_not_reveal_registered_emails() {
    let ctx = TestContext::new();
    ctx.signed_in("known@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let request_code = |email: &str| {
        test::TestRequest::post()
            .uri("/api/v1/users/login/otp")
            .set_json(json!({ "email": email }))
            .to_request()
    };
    let known: Value = test::call_and_read_body_json(&app, request_code("known@x.com")).await;
    let unknown: Value = test::call_and_read_body_json(&app, request_code("ghost@x.com")).await;
    assert_eq!(known["success"], true);
    assert_eq!(unknown["success"], true);
    assert_eq!(known["data"]["message"], unknown["data"]["message"]);

    let known_code = known["data"]["code"].as_str().unwrap();
    let wrong_code = if known_code == "0000" { "1111" } else { "0000" };

    let attempt = |email: &str, otp: &str| {
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "email": email, "otp": otp }))
            .to_request()
    };
    let wrong = test::call_service(&app, attempt("known@x.com", wrong_code)).await;
    let ghost = test::call_service(&app, attempt("ghost@x.com", "1234")).await;
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ghost.status(), StatusCode::BAD_REQUEST);

    let wrong: Value = test::read_body_json(wrong).await;
    let ghost: Value = test::read_body_json(ghost).await;
    assert_eq!(wrong, ghost);
    assert_eq!(wrong["error"]["message"], "invalid otp");
}

#[actix_rt::test]
async fn test_refresh_issues_new_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({"email": "r@x.com", "name": "Ray", "country": "KE", "language": "sw"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let code = body["data"]["otp"]["code"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "r@x.com", "code": code}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/token/refresh")
        .set_json(json!({ "refresh_token": refresh_token }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["user"]["email"], "r@x.com");

    // an access token is not accepted where a refresh token is expected
    let req = test::TestRequest::post()
        .uri("/api/v1/users/token/refresh")
        .set_json(json!({ "refresh_token": access_token }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_like_and_flag_once_per_user() {
    let ctx = TestContext::new();
    let company_id = ctx.company("Acme", "acme.example").await;
    let (_, author_token) = ctx.signed_in("author@x.com").await;
    let (_, reader_token) = ctx.signed_in("reader@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews")
        .insert_header(bearer(&author_token))
        .set_json(json!({"company_id": company_id, "rating": 5, "title": "Great", "body": "Clean work"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let review_id = body["data"]["id"].as_str().unwrap().to_string();

    for reaction in ["like", "flag"] {
        let react = || {
            test::TestRequest::post()
                .uri(&format!("/api/v1/reviews/{}/{}", review_id, reaction))
                .insert_header(bearer(&reader_token))
                .to_request()
        };
        let res = test::call_service(&app, react()).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = test::call_service(&app, react()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "DUPLICATE_VALUE");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/reviews/{}", review_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["like_count"], 1);
    assert_eq!(body["data"]["flag_count"], 1);
}

#[actix_rt::test]
async fn test_only_the_author_changes_a_review() {
    let ctx = TestContext::new();
    let company_id = ctx.company("Acme", "acme.example").await;
    let (_, author_token) = ctx.signed_in("author@x.com").await;
    let (_, other_token) = ctx.signed_in("other@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews")
        .insert_header(bearer(&author_token))
        .set_json(json!({"company_id": company_id, "rating": 2, "title": "Late", "review_body": "Two weeks late"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/v1/reviews/{}", body["data"]["id"].as_str().unwrap());

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .set_json(json!({"rating": 5}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .set_json(json!({"rating": 3}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["rating"], 3);
    assert_eq!(body["data"]["title"], "Late");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_review_requires_authentication_and_valid_rating() {
    let ctx = TestContext::new();
    let company_id = ctx.company("Acme", "acme.example").await;
    let (_, token) = ctx.signed_in("a@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let review = json!({"company_id": company_id, "rating": 6, "title": "Hm", "review_body": "Hm"});

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews")
        .set_json(&review)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/reviews")
        .insert_header(bearer(&token))
        .set_json(&review)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["fields"]["rating"].is_array());
}

#[actix_rt::test]
async fn test_deleted_user_token_is_rejected() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.signed_in("gone@x.com").await;
    let (_, other_token) = ctx.signed_in("stay@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let uri = format!("/api/v1/users/{}", user_id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "AUTHENTICATION_FAILED");
}

#[actix_rt::test]
async fn test_profile_update_keeps_protected_fields() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.signed_in("p@x.com").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{}", user_id))
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Renamed", "is_verified": true}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["country"], "NG");
    assert_eq!(body["data"]["id"], user_id.to_string());
}
