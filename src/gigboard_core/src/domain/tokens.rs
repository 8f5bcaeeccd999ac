//! Lifetimes of the three token kinds the account subsystem issues.

/// Session tokens authenticate API calls for a day; there is no refresh and
/// no revocation list, expiry is the only way out.
pub const SESSION_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Email verification links stay valid for a day. Requesting a resend
/// replaces the stored token, which invalidates any earlier link.
pub const VERIFICATION_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Password reset tokens are short-lived and single-use.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 60 * 60;
