pub mod auth;
pub mod config;
pub mod email;
pub mod persistence;

// Re-export commonly used types for convenience
pub use auth::{jwt::JwtTokenCodec, password::Argon2PasswordHasher};
pub use config::settings::{AllowedOrigins, Settings};
pub use email::{
    mock_email_client::{MockEmailClient, SentEmail},
    postmark_email_client::PostmarkEmailClient,
};
pub use persistence::{
    in_memory::{InMemoryAccountStore, InMemoryAuditLog, InMemoryJobStore},
    postgres_account_store::PostgresAccountStore,
    postgres_audit_log::PostgresAuditLog,
    postgres_job_store::PostgresJobStore,
};
