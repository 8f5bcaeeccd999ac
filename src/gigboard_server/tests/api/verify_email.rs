use serde_json::{Value, json};

use gigboard_core::Email;

use crate::helpers::{FRONTEND_URL, TEST_PASSWORD, TestApp, random_email};

#[tokio::test]
async fn the_mailed_token_unlocks_login() {
    let app = TestApp::spawn().await;
    let email = random_email();
    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;
    assert_eq!(app.login(&email, TEST_PASSWORD).await.status().as_u16(), 403);

    let token = app.verification_token_for(&email).await;
    let response = app
        .post_json("/api/verify-email", &json!({ "token": token }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email verified successfully");

    let stored = app.accounts.get(&Email::parse(&email).unwrap()).unwrap();
    assert!(stored.is_verified);
    assert!(stored.verification_token.is_none());

    assert_eq!(app.login(&email, TEST_PASSWORD).await.status().as_u16(), 200);
}

#[tokio::test]
async fn verification_tokens_are_single_use() {
    let app = TestApp::spawn().await;
    let email = random_email();
    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;
    let token = app.verification_token_for(&email).await;

    let first = app
        .post_json("/api/verify-email", &json!({ "token": token.as_str() }))
        .await;
    let second = app
        .post_json("/api/verify-email", &json!({ "token": token.as_str() }))
        .await;

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 400);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn a_garbage_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/verify-email", &json!({ "token": "not-a-real-token" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn the_email_link_redirects_to_the_frontend_login() {
    let app = TestApp::spawn().await;
    let email = random_email();
    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;
    let token = app.verification_token_for(&email).await;

    let response = app.get(&format!("/api/verify-email/{token}")).await;

    assert_eq!(response.status().as_u16(), 303);
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert_eq!(location, format!("{FRONTEND_URL}/login?verified=true"));

    let stored = app.accounts.get(&Email::parse(&email).unwrap()).unwrap();
    assert!(stored.is_verified);
}

#[tokio::test]
async fn a_bad_link_is_a_plain_400_not_a_redirect() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/verify-email/expired-or-garbage").await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(response.headers().get(reqwest::header::LOCATION).is_none());
}

#[tokio::test]
async fn resending_replaces_the_previous_token() {
    let app = TestApp::spawn().await;
    let email = random_email();
    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;
    let original = app.verification_token_for(&email).await;

    let response = app
        .post_json(
            "/api/resend-verification",
            &json!({ "email": email.as_str() }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Verification email sent");

    let replacement = app.verification_token_for(&email).await;
    assert_ne!(original, replacement);

    // Only the replacement still works.
    let stale = app
        .post_json("/api/verify-email", &json!({ "token": original }))
        .await;
    assert_eq!(stale.status().as_u16(), 400);

    let fresh = app
        .post_json("/api/verify-email", &json!({ "token": replacement }))
        .await;
    assert_eq!(fresh.status().as_u16(), 200);
}

#[tokio::test]
async fn resend_does_not_reveal_whether_an_account_exists() {
    let app = TestApp::spawn().await;
    let verified = app.seed_account("client").await;

    let already_verified = app
        .post_json(
            "/api/resend-verification",
            &json!({ "email": verified.email.as_str() }),
        )
        .await;
    let unknown = app
        .post_json(
            "/api/resend-verification",
            &json!({ "email": random_email() }),
        )
        .await;
    let malformed = app
        .post_json("/api/resend-verification", &json!({ "email": "not-an-email" }))
        .await;

    assert_eq!(already_verified.status().as_u16(), 400);
    assert_eq!(unknown.status().as_u16(), 400);
    assert_eq!(malformed.status().as_u16(), 400);

    let first: Value = already_verified.json().await.unwrap();
    let second: Value = unknown.json().await.unwrap();
    let third: Value = malformed.json().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(first["message"], "Account not found or already verified");
}
