use secrecy::ExposeSecret;
use serde_json::{Value, json};

use gigboard_core::Email;

use crate::helpers::{TEST_PASSWORD, TestApp, random_email};

#[tokio::test]
async fn register_creates_an_unverified_account() {
    let app = TestApp::spawn().await;
    let email = random_email();

    let response = app
        .register("Ada", "Lovelace", &email, TEST_PASSWORD, "freelancer")
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["userId"].as_str().is_some());

    let stored = app.accounts.get(&Email::parse(&email).unwrap()).unwrap();
    assert!(!stored.is_verified);
    assert!(stored.verification_token.is_some());
    assert_ne!(stored.password_hash.expose_secret(), TEST_PASSWORD);
}

#[tokio::test]
async fn register_mails_a_verification_link() {
    let app = TestApp::spawn().await;
    let email = random_email();

    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;

    let mailed = app.verification_token_for(&email).await;
    let stored = app.accounts.get(&Email::parse(&email).unwrap()).unwrap();
    assert_eq!(stored.verification_token.as_deref(), Some(mailed.as_str()));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::spawn().await;
    let email = random_email();
    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;

    let response = app
        .register("Eva", "Alike", &email, "another-pass", "freelancer")
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn email_comparison_ignores_case_and_surrounding_whitespace() {
    let app = TestApp::spawn().await;
    app.register(
        "Ada",
        "Lovelace",
        "ada.unique@example.com",
        TEST_PASSWORD,
        "client",
    )
    .await;

    let response = app
        .register(
            "Ada",
            "Again",
            "  ADA.Unique@Example.com ",
            TEST_PASSWORD,
            "client",
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = TestApp::spawn().await;
    let email = random_email();
    let cases = [
        (
            json!({
                "firstName": "Ada", "lastName": "L",
                "email": "not-an-email",
                "password": TEST_PASSWORD, "accountType": "client",
            }),
            "malformed email",
        ),
        (
            json!({
                "firstName": "Ada", "lastName": "L",
                "email": email.as_str(),
                "password": "short", "accountType": "client",
            }),
            "password under 8 chars",
        ),
        (
            json!({
                "firstName": "Ada", "lastName": "L",
                "email": email.as_str(),
                "password": TEST_PASSWORD, "accountType": "admin",
            }),
            "self-provisioned admin",
        ),
        (
            json!({
                "firstName": "   ", "lastName": "L",
                "email": email.as_str(),
                "password": TEST_PASSWORD, "accountType": "client",
            }),
            "blank first name",
        ),
        (
            json!({
                "firstName": "Ada", "lastName": "L",
                "email": email.as_str(),
                "password": TEST_PASSWORD, "accountType": "boss",
            }),
            "unknown account type",
        ),
    ];

    for (body, case) in cases {
        let response = app.post_json("/api/register", &body).await;
        assert_eq!(response.status().as_u16(), 400, "{case} should be a 400");
    }
}

#[tokio::test]
async fn concurrent_duplicate_registrations_resolve_to_one_account() {
    let app = TestApp::spawn().await;
    let email = random_email();

    let (first, second) = tokio::join!(
        app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client"),
        app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client"),
    );

    let mut statuses = [first.status().as_u16(), second.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 400]);
}
