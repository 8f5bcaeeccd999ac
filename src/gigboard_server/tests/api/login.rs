use serde_json::{Value, json};

use gigboard_core::Email;

use crate::helpers::{TEST_PASSWORD, TestApp, random_email};

#[tokio::test]
async fn login_before_verification_carries_the_resend_hint() {
    let app = TestApp::spawn().await;
    let email = random_email();
    app.register("Ada", "Lovelace", &email, TEST_PASSWORD, "client")
        .await;

    let response = app.login(&email, TEST_PASSWORD).await;

    assert_eq!(response.status().as_u16(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Please verify your email before logging in");
    assert_eq!(body["needsVerification"], true);
    assert_eq!(body["email"], email);
}

#[tokio::test]
async fn verified_login_returns_a_token_and_the_sanitized_user() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("client").await;

    let response = app.login(&account.email, TEST_PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token"].as_str().unwrap().matches('.').count(), 2);
    assert_eq!(body["user"]["email"], account.email);
    assert_eq!(body["user"]["account_type"], "client");
    assert_eq!(body["user"]["is_verified"], true);
    assert!(!body["user"].to_string().contains("password"));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("client").await;

    let wrong_password = app.login(&account.email, "not-the-password").await;
    let unknown_email = app.login(&random_email(), TEST_PASSWORD).await;

    assert_eq!(wrong_password.status().as_u16(), 400);
    assert_eq!(unknown_email.status().as_u16(), 400);

    let first: Value = wrong_password.json().await.unwrap();
    let second: Value = unknown_email.json().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first["message"], "Invalid credentials");
}

#[tokio::test]
async fn malformed_credentials_read_as_invalid_credentials_too() {
    let app = TestApp::spawn().await;

    let response = app.login("not-an-email", TEST_PASSWORD).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn every_attempt_lands_in_the_audit_log() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("freelancer").await;

    app.login(&account.email, "wrong-password").await;
    app.login(&random_email(), TEST_PASSWORD).await;

    // seed_account logged in once already, so: one success, two failures.
    let attempts = app.audit.attempts().await;
    assert_eq!(attempts.len(), 3);
    assert_eq!(attempts.iter().filter(|a| a.success).count(), 1);
    assert!(
        attempts
            .iter()
            .any(|a| !a.success && a.account_id.is_none()),
        "the unknown-email attempt should be recorded without an account id"
    );
    assert!(
        attempts
            .iter()
            .any(|a| !a.success && a.account_id == Some(account.id)),
        "the wrong-password attempt should carry the account id"
    );
}

#[tokio::test]
async fn successful_login_sends_an_alert_with_the_location() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("client").await;

    let response = app
        .post_json(
            "/api/login",
            &json!({
                "email": account.email.as_str(),
                "password": TEST_PASSWORD,
                "location": "Berlin, DE",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let recipient = Email::parse(&account.email).unwrap();
    let sent = app.outbox.sent_to(&recipient).await;
    let alert = sent
        .iter()
        .rev()
        .find(|mail| mail.subject == "New login to your account")
        .expect("no login alert in the outbox");
    assert!(alert.content.contains("Berlin, DE"));
}
