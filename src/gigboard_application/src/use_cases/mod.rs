pub mod login;
pub mod register;
pub mod request_password_reset;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;
pub mod verify_session;

#[cfg(test)]
pub(crate) mod support;
