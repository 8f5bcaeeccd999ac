use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::email::Email;

#[derive(Debug, Error, PartialEq)]
#[error("Account type must be one of: client, freelancer, admin")]
pub struct AccountKindError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Client,
    Freelancer,
    Admin,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Freelancer => "freelancer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = AccountKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "freelancer" => Ok(Self::Freelancer),
            "admin" => Ok(Self::Admin),
            _ => Err(AccountKindError),
        }
    }
}

/// A stored account row. Never serialized directly: responses go through
/// [`AccountSummary`], which is the only mapping out of this type, so the
/// password hash and token columns cannot leak into a JSON body.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password_hash: Secret<String>,
    pub kind: AccountKind,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub hourly_rate: Option<f64>,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub reset_token_hash: Option<Secret<String>>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert an account. The verification token travels
/// with the insert so a stored account always has one from the start.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password_hash: Secret<String>,
    pub kind: AccountKind,
    pub verification_token: String,
}

/// Full replacement of the editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub hourly_rate: Option<f64>,
    pub avatar_url: Option<String>,
}

/// The public view of an account, as returned by login, session checks and
/// profile lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub account_type: AccountKind,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub hourly_rate: Option<f64>,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            account_type: account.kind,
            bio: account.bio.clone(),
            skills: account.skills.clone(),
            hourly_rate: account.hourly_rate,
            avatar_url: account.avatar_url.clone(),
            is_verified: account.is_verified,
        }
    }
}
