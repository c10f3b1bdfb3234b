//! End-to-end account and session flows through the full HTTP stack.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use backend::domain::TRACE_ID_HEADER;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

use support::{PASSWORD, World, app_for, body_json, login, register, server_state, session_settings};

#[actix_web::test]
async fn server_state_serves_register_login_and_token_check() {
    let session = session_settings();
    let app = actix_test::init_service(app_for(server_state(), &session)).await;
    let id = register(&app, "ada", "ada@example.com").await;
    let cookie = login(&app, "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/token")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "_id": id, "user_name": "ada", "email": "ada@example.com" })
    );
}

#[actix_web::test]
async fn login_response_carries_profile_and_session_cookie() {
    let world = World::new();
    let app = actix_test::init_service(world.app()).await;
    let id = register(&app, "ada", "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(
        body_json(response).await,
        json!({
            "message": "Login successful",
            "data": { "_id": id, "user_name": "ada", "email": "ada@example.com" }
        })
    );
}

#[rstest]
#[case("ada@example.com", "wrong-password")]
#[case("nobody@example.com", PASSWORD)]
#[actix_web::test]
async fn bad_credentials_are_unauthorized(#[case] email: &str, #[case] password: &str) {
    let world = World::new();
    let app = actix_test::init_service(world.app()).await;
    register(&app, "ada", "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(body_json(response).await, json!({ "message": "invalid credentials" }));
}

#[actix_web::test]
async fn registration_rejects_duplicates_and_admin_role() {
    let world = World::new();
    let app = actix_test::init_service(world.app()).await;
    register(&app, "ada", "ada@example.com").await;

    let duplicate = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "user_name": "ada2", "email": "ada@example.com", "password": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(duplicate).await, json!({ "message": "Email already in use" }));

    let admin = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "user_name": "mallory",
                "email": "mallory@example.com",
                "password": "x",
                "role": "admin",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(admin.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn self_service_update_and_delete() {
    let world = World::new();
    let app = actix_test::init_service(world.app()).await;
    let id = register(&app, "ada", "ada@example.com").await;
    let cookie = login(&app, "ada@example.com").await;

    let updated = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users")
            .cookie(cookie.clone())
            .set_json(json!({ "email": "lovelace@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["email"], "lovelace@example.com");

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(body_json(fetched).await["email"], "lovelace@example.com");

    let relogin = login(&app, "lovelace@example.com").await;
    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/users")
            .cookie(relogin)
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let missing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn users_listing_exposes_only_public_fields() {
    let world = World::new();
    let app = actix_test::init_service(world.app()).await;
    register(&app, "ada", "ada@example.com").await;
    register(&app, "bob", "bob@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    for user in body.as_array().expect("array") {
        let mut keys: Vec<&str> = user
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["_id", "email", "user_name"]);
    }
}

#[rstest]
#[case("not json", "application/json")]
#[case(r#"{"email":"a@x.com"}"#, "application/json")]
#[actix_web::test]
async fn malformed_login_bodies_are_bad_requests(#[case] body: &str, #[case] content_type: &str) {
    let world = World::new();
    let app = actix_test::init_service(world.app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("content-type", content_type))
            .set_payload(body.to_owned())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .starts_with("Invalid request body")
    );
}
