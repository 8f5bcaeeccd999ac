use uuid::Uuid;

use crate::domain::account::AccountKind;
use crate::domain::email::Email;

/// The claims carried by a session token. Only enough to find the account
/// again; authorization decisions re-read the stored account so a stale
/// token cannot keep an outdated role alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account_id: Uuid,
    pub email: Email,
    pub kind: AccountKind,
}
