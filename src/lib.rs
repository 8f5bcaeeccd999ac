//! # GigBoard - Freelance Marketplace API Library
//!
//! This is a facade crate that re-exports the public APIs of the GigBoard
//! components. Depend on this crate to get the whole stack in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gigboard = { path = "../gigboard" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `Job`, `Proposal`, etc.
//! - **Ports**: `AccountStore`, `JobStore`, `AuditLog`, `PasswordHasher`, `TokenCodec`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `VerifyEmailUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `JwtTokenCodec`, `PostmarkEmailClient`, etc.
//! - **Service**: `GigboardService` - the assembled HTTP API

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gigboard_core::*;
}

// Re-export most commonly used core types at the root level
pub use gigboard_core::{
    Account, AccountKind, AccountSummary, Email, EmailError, Job, JobStatus, LoginAttempt,
    NewAccount, NewJob, NewProposal, Password, PasswordError, ProfileUpdate, Proposal,
    ProposalDetails, ProposalStatus, SessionIdentity,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions the adapters implement
pub mod ports {
    pub use gigboard_core::{
        AccountStore, AccountStoreError, AuditLog, AuditLogError, EmailClient, JobStore,
        JobStoreError, PasswordHashError, PasswordHasher, TokenCodec, TokenCodecError,
    };
}

// Re-export the ports at root level
pub use gigboard_core::{
    AccountStore, AccountStoreError, AuditLog, AuditLogError, EmailClient, JobStore,
    JobStoreError, PasswordHasher, TokenCodec,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gigboard_application::*;
}

// Re-export use cases at root level
pub use gigboard_application::{
    LoginUseCase, NotificationSender, RegisterUseCase, RequestPasswordResetUseCase,
    ResendVerificationUseCase, ResetPasswordUseCase, VerifyEmailUseCase, VerifySessionUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use gigboard_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gigboard_adapters::email::*;
    }

    /// Password hashing and token signing
    pub mod auth {
        pub use gigboard_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use gigboard_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gigboard_adapters::{
    AllowedOrigins, Argon2PasswordHasher, InMemoryAccountStore, InMemoryAuditLog, InMemoryJobStore,
    JwtTokenCodec, MockEmailClient, PostgresAccountStore, PostgresAuditLog, PostgresJobStore,
    PostmarkEmailClient, Settings,
};

// ============================================================================
// HTTP Layer and Assembled Service (Main Entry Point)
// ============================================================================

/// Route handlers, error mapping and session extraction
pub mod http {
    pub use gigboard_axum::*;
}

pub use gigboard_axum::{ApiError, CurrentAccount, SessionGate};

pub use gigboard_server::{GigboardService, configure_postgresql, get_postgres_pool, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
