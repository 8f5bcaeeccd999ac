pub mod notifications;
pub mod use_cases;

pub use notifications::NotificationSender;

pub use use_cases::{
    login::{LoginError, LoginSuccess, LoginUseCase},
    register::{RegisterError, RegisterUseCase},
    request_password_reset::RequestPasswordResetUseCase,
    resend_verification::{ResendVerificationError, ResendVerificationUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
    verify_session::{VerifySessionError, VerifySessionUseCase},
};
