pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountKind, AccountKindError, AccountSummary, NewAccount, ProfileUpdate},
    audit::LoginAttempt,
    email::{Email, EmailError},
    job::{
        Job, JobStatus, JobStatusError, JobUpdate, NewJob, NewProposal, Proposal, ProposalDetails,
        ProposalStatus,
    },
    password::{Password, PasswordError},
    session::SessionIdentity,
    tokens::{RESET_TOKEN_TTL_SECONDS, SESSION_TOKEN_TTL_SECONDS, VERIFICATION_TOKEN_TTL_SECONDS},
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, AuditLog, AuditLogError, JobStore, JobStoreError,
    },
    services::{EmailClient, PasswordHashError, PasswordHasher, TokenCodec, TokenCodecError},
};
