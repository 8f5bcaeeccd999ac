//! Route handlers for the GigBoard API.
//!
//! Each handler parses and validates the request, runs one use case or
//! store call, and maps the outcome through [`crate::error::ApiError`].
//! Anything beyond that belongs below the HTTP layer.

pub mod forgot_password;
pub mod jobs;
pub mod login;
pub mod profile;
pub mod proposals;
pub mod register;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;
pub mod verify_session;

pub use forgot_password::forgot_password;
pub use jobs::{create_job, delete_job, get_job, list_jobs, update_job, update_job_status};
pub use login::login;
pub use profile::{get_profile, update_profile};
pub use proposals::{list_proposals, submit_proposal, update_proposal_status};
pub use register::register;
pub use resend_verification::resend_verification;
pub use reset_password::reset_password;
pub use verify_email::{verify_email, verify_email_link};
pub use verify_session::verify_session;

use crate::error::ApiError;

/// Required text fields reject empty and whitespace-only values.
fn non_empty(value: String, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
