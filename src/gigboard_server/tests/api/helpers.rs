use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use secrecy::Secret;
use serde_json::{Value, json};
use uuid::Uuid;

use gigboard_adapters::config::test as test_config;
use gigboard_adapters::{
    Argon2PasswordHasher, InMemoryAccountStore, InMemoryAuditLog, InMemoryJobStore, JwtTokenCodec,
    MockEmailClient,
};
use gigboard_application::NotificationSender;
use gigboard_core::{AccountKind, Email};
use gigboard_server::GigboardService;

pub const TEST_PASSWORD: &str = "password123";
pub const FRONTEND_URL: &str = "http://localhost:5173";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub accounts: InMemoryAccountStore,
    pub jobs: InMemoryJobStore,
    pub audit: InMemoryAuditLog,
    pub outbox: MockEmailClient,
}

/// An account created through the API, with a live session token.
pub struct TestAccount {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let accounts = InMemoryAccountStore::new();
        let jobs = InMemoryJobStore::new();
        let audit = InMemoryAuditLog::new();
        let outbox = MockEmailClient::new();

        let codec = JwtTokenCodec::new(
            Secret::from("test-session-secret".to_string()),
            Secret::from("test-verification-secret".to_string()),
        );
        let notifier = NotificationSender::new(
            outbox.clone(),
            "http://localhost:3000".to_string(),
            FRONTEND_URL.to_string(),
        );

        let service = GigboardService::new(
            accounts.clone(),
            jobs.clone(),
            audit.clone(),
            Argon2PasswordHasher,
            codec,
            notifier,
        );

        let listener = tokio::net::TcpListener::bind(test_config::APP_ADDRESS)
            .await
            .expect("Failed to bind ephemeral port");
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(service.run(listener, None));

        // Redirects stay visible so tests can assert on the 303.
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            accounts,
            jobs,
            audit,
            outbox,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json_with_token(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json_with_token(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.http_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_json_with_token(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.http_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        account_type: &str,
    ) -> reqwest::Response {
        self.post_json(
            "/api/register",
            &json!({
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "password": password,
                "accountType": account_type,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/api/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Register an account, redeem its verification link and log it in.
    pub async fn seed_account(&self, account_type: &str) -> TestAccount {
        let email = random_email();
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();

        let response = self
            .register(&first_name, &last_name, &email, TEST_PASSWORD, account_type)
            .await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "registration failed in test setup"
        );

        let token = self.verification_token_for(&email).await;
        let response = self
            .post_json("/api/verify-email", &json!({ "token": token }))
            .await;
        assert_eq!(
            response.status().as_u16(),
            200,
            "verification failed in test setup"
        );

        self.login_account(&email, TEST_PASSWORD).await
    }

    /// Admins cannot be self-registered, so tests promote a seeded account
    /// directly in the store and log in again.
    pub async fn seed_admin(&self) -> TestAccount {
        let account = self.seed_account("client").await;

        let email = Email::parse(&account.email).unwrap();
        let mut stored = self.accounts.get(&email).unwrap();
        stored.kind = AccountKind::Admin;
        self.accounts.upsert(stored);

        self.login_account(&account.email, &account.password).await
    }

    pub async fn login_account(&self, email: &str, password: &str) -> TestAccount {
        let response = self.login(email, password).await;
        assert_eq!(response.status().as_u16(), 200, "login failed in test setup");

        let body: Value = response.json().await.unwrap();
        TestAccount {
            id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
            email: email.to_string(),
            password: password.to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// The token inside the most recent verification email sent to `email`.
    pub async fn verification_token_for(&self, email: &str) -> String {
        let recipient = Email::parse(email).unwrap();
        let sent = self.outbox.sent_to(&recipient).await;
        let mail = sent
            .iter()
            .rev()
            .find(|mail| mail.content.contains("/api/verify-email/"))
            .expect("no verification email in the outbox");
        token_from_verification_link(&mail.content)
    }

    /// Reset emails are sent from a detached task; poll until one lands.
    pub async fn wait_for_reset_token(&self, email: &str) -> String {
        let recipient = Email::parse(email).unwrap();
        for _ in 0..100 {
            let sent = self.outbox.sent_to(&recipient).await;
            if let Some(mail) = sent
                .iter()
                .rev()
                .find(|mail| mail.content.contains("reset-password?token="))
            {
                return token_from_reset_link(&mail.content);
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        panic!("no reset email arrived for {email}");
    }

    /// Create a job through the API and return its id.
    pub async fn create_job(&self, token: &str, title: &str) -> String {
        let response = self
            .post_json_with_token(
                "/api/jobs",
                token,
                &json!({
                    "title": title,
                    "description": "Build the thing described in the title",
                    "budget": 2500.0,
                    "skills": "rust, sql",
                    "duration": "2 weeks",
                }),
            )
            .await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "job creation failed in test setup"
        );
        let body: Value = response.json().await.unwrap();
        body["jobId"].as_str().unwrap().to_string()
    }

    /// Submit a proposal through the API and return its id.
    pub async fn submit_proposal(&self, token: &str, job_id: &str) -> String {
        let response = self
            .post_json_with_token(
                &format!("/api/jobs/{job_id}/proposals"),
                token,
                &json!({ "cover_letter": "I can do this", "bid_amount": 1800.0 }),
            )
            .await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "proposal submission failed in test setup"
        );
        let body: Value = response.json().await.unwrap();
        body["proposalId"].as_str().unwrap().to_string()
    }
}

/// Unique address per call; the uuid tag keeps parallel registrations in a
/// single test from ever colliding.
pub fn random_email() -> String {
    let name: String = FirstName().fake();
    let local: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("{local}.{}@example.com", Uuid::new_v4().simple())
}

pub fn token_from_verification_link(content: &str) -> String {
    content
        .split_whitespace()
        .find(|part| part.contains("/api/verify-email/"))
        .and_then(|link| link.rsplit('/').next())
        .expect("verification link missing from email body")
        .to_string()
}

pub fn token_from_reset_link(content: &str) -> String {
    content
        .split_whitespace()
        .find(|part| part.contains("reset-password?token="))
        .and_then(|link| link.split_once("token=").map(|(_, token)| token))
        .expect("reset link missing from email body")
        .to_string()
}
