use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn public_profiles_expose_no_credential_material() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("freelancer").await;

    let response = app.get(&format!("/api/profile/{}", account.id)).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], account.id.to_string());
    assert_eq!(body["email"], account.email);
    assert_eq!(body["account_type"], "freelancer");
    let raw = body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("token"));
}

#[tokio::test]
async fn unknown_profiles_are_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get(&format!("/api/profile/{}", Uuid::new_v4())).await;

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn profile_updates_round_trip() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("freelancer").await;

    let response = app
        .put_json_with_token(
            "/api/profile",
            &account.token,
            &json!({
                "first_name": "Ada",
                "last_name": "King",
                "bio": "Countess of Lovelace",
                "skills": "analysis, engines",
                "hourly_rate": 120.0,
                "avatar_url": "https://example.com/ada.png",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Profile updated successfully");

    let profile: Value = app
        .get(&format!("/api/profile/{}", account.id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(profile["first_name"], "Ada");
    assert_eq!(profile["last_name"], "King");
    assert_eq!(profile["bio"], "Countess of Lovelace");
    assert_eq!(profile["hourly_rate"], 120.0);
}

#[tokio::test]
async fn clearing_optional_fields_is_allowed() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("freelancer").await;
    app.put_json_with_token(
        "/api/profile",
        &account.token,
        &json!({ "first_name": "Ada", "last_name": "King", "bio": "set once" }),
    )
    .await;

    let response = app
        .put_json_with_token(
            "/api/profile",
            &account.token,
            &json!({ "first_name": "Ada", "last_name": "King" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let profile: Value = app
        .get(&format!("/api/profile/{}", account.id))
        .await
        .json()
        .await
        .unwrap();
    assert!(profile["bio"].is_null());
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("client").await;

    let response = app
        .put_json_with_token(
            "/api/profile",
            &account.token,
            &json!({ "first_name": "  ", "last_name": "King" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid input: First name must not be empty");
}
