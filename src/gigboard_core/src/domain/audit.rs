use uuid::Uuid;

/// One row in the login audit trail. `account_id` is `None` when the
/// attempted email matched no account, so failed probes are still recorded
/// without revealing whether the address exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub account_id: Option<Uuid>,
    pub success: bool,
    pub location: Option<String>,
}
