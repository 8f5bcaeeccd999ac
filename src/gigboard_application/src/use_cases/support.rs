//! Shared test doubles for the use-case unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

use gigboard_core::{
    Account, AccountKind, AccountStore, AccountStoreError, AuditLog, AuditLogError, Email,
    EmailClient, LoginAttempt, NewAccount, PasswordHashError, PasswordHasher, ProfileUpdate,
    SessionIdentity, TokenCodec, TokenCodecError,
};

use crate::notifications::NotificationSender;

#[derive(Clone, Default)]
pub(crate) struct MockAccountStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl MockAccountStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn seed(&self, account: Account) {
        self.accounts
            .write()
            .await
            .insert(account.email.clone(), account);
    }

    pub(crate) async fn get(&self, email: &Email) -> Option<Account> {
        self.accounts.read().await.get(email).cloned()
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Uuid, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(AccountStoreError::DuplicateEmail);
        }
        let id = Uuid::new_v4();
        accounts.insert(
            account.email.clone(),
            Account {
                id,
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email,
                password_hash: account.password_hash,
                kind: account.kind,
                bio: None,
                skills: None,
                hourly_rate: None,
                avatar_url: None,
                is_verified: false,
                verification_token: Some(account.verification_token),
                reset_token_hash: None,
                reset_token_expires_at: None,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.id == id)
            .cloned())
    }

    async fn consume_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(email) {
            if account.verification_token.as_deref() == Some(token) {
                account.is_verified = true;
                account.verification_token = None;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn replace_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(email) {
            Some(account) if !account.is_verified => {
                account.verification_token = Some(token.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn store_reset_token(
        &self,
        email: &Email,
        token_hash: Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(email).ok_or(AccountStoreError::NotFound)?;
        account.reset_token_hash = Some(token_hash);
        account.reset_token_expires_at = Some(expires_at);
        Ok(())
    }

    async fn accounts_with_pending_reset(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .filter(|account| {
                account.reset_token_hash.is_some()
                    && account.reset_token_expires_at.is_some_and(|at| at > now)
            })
            .cloned()
            .collect())
    }

    async fn complete_password_reset(
        &self,
        id: Uuid,
        new_password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.id == id)
            .ok_or(AccountStoreError::NotFound)?;
        account.password_hash = new_password_hash;
        account.reset_token_hash = None;
        account.reset_token_expires_at = None;
        Ok(())
    }

    async fn update_profile(
        &self,
        _id: Uuid,
        _update: ProfileUpdate,
    ) -> Result<(), AccountStoreError> {
        unimplemented!()
    }
}

/// Stands in for argon2 without the cost: "hashing" is a marked copy of the
/// input, so tests can still assert that stored values are not plaintext.
#[derive(Clone, Default)]
pub(crate) struct FakeHasher {
    pub(crate) hash_calls: Arc<AtomicUsize>,
    pub(crate) verify_calls: Arc<AtomicUsize>,
}

pub(crate) fn fake_hash(plaintext: &str) -> String {
    format!("hashed:{plaintext}")
}

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, plaintext: &Secret<String>) -> Result<Secret<String>, PasswordHashError> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Secret::from(fake_hash(plaintext.expose_secret())))
    }

    async fn verify(
        &self,
        candidate: &Secret<String>,
        expected_hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(*expected_hash.expose_secret() == fake_hash(candidate.expose_secret()))
    }
}

/// Transparent stand-in for the JWT codec. Tokens are readable strings so
/// test failures stay debuggable; a serial number keeps reissued
/// verification tokens distinct.
#[derive(Clone, Default)]
pub(crate) struct FakeCodec {
    issued_verifications: Arc<AtomicUsize>,
}

impl TokenCodec for FakeCodec {
    fn issue_session_token(&self, identity: &SessionIdentity) -> Result<String, TokenCodecError> {
        Ok(format!(
            "session:{}:{}:{}",
            identity.account_id, identity.email, identity.kind
        ))
    }

    fn verify_session_token(&self, token: &str) -> Result<SessionIdentity, TokenCodecError> {
        let rest = token.strip_prefix("session:").ok_or(TokenCodecError::Invalid)?;
        let mut parts = rest.splitn(3, ':');
        let account_id = parts
            .next()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or(TokenCodecError::Invalid)?;
        let email = parts
            .next()
            .and_then(|raw| Email::parse(raw).ok())
            .ok_or(TokenCodecError::Invalid)?;
        let kind = parts
            .next()
            .and_then(|raw| raw.parse::<AccountKind>().ok())
            .ok_or(TokenCodecError::Invalid)?;
        Ok(SessionIdentity {
            account_id,
            email,
            kind,
        })
    }

    fn issue_verification_token(&self, email: &Email) -> Result<String, TokenCodecError> {
        let serial = self.issued_verifications.fetch_add(1, Ordering::SeqCst);
        Ok(format!("verify:{serial}:{email}"))
    }

    fn verify_verification_token(&self, token: &str) -> Result<Email, TokenCodecError> {
        let rest = token.strip_prefix("verify:").ok_or(TokenCodecError::Invalid)?;
        let (_serial, email) = rest.split_once(':').ok_or(TokenCodecError::Invalid)?;
        Email::parse(email).map_err(|_| TokenCodecError::Invalid)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SentEmail {
    pub(crate) recipient: Email,
    pub(crate) subject: String,
    pub(crate) content: String,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
}

impl RecordingEmailClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockAuditLog {
    attempts: Arc<RwLock<Vec<LoginAttempt>>>,
}

impl MockAuditLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn attempts(&self) -> Vec<LoginAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl AuditLog for MockAuditLog {
    async fn record_login_attempt(&self, attempt: LoginAttempt) -> Result<(), AuditLogError> {
        self.attempts.write().await.push(attempt);
        Ok(())
    }
}

pub(crate) fn notifier(
    client: RecordingEmailClient,
) -> NotificationSender<RecordingEmailClient> {
    NotificationSender::new(
        client,
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    )
}

pub(crate) fn verified_account(email: &str, password: &str, kind: AccountKind) -> Account {
    Account {
        id: Uuid::new_v4(),
        first_name: "Test".to_string(),
        last_name: "Account".to_string(),
        email: Email::parse(email).unwrap(),
        password_hash: Secret::from(fake_hash(password)),
        kind,
        bio: None,
        skills: None,
        hourly_rate: None,
        avatar_url: None,
        is_verified: true,
        verification_token: None,
        reset_token_hash: None,
        reset_token_expires_at: None,
        created_at: Utc::now(),
    }
}

pub(crate) fn unverified_account(email: &str, password: &str, token: &str) -> Account {
    Account {
        is_verified: false,
        verification_token: Some(token.to_string()),
        ..verified_account(email, password, AccountKind::Client)
    }
}
