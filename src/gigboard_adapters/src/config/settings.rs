use std::time::Duration;

use secrecy::Secret;
use serde::Deserialize;

use super::constants::{env, prod};

/// Maps well-known environment variables onto their config keys. These take
/// precedence over `config.json` and the `GIGBOARD_*` prefixed variables.
const ENV_OVERRIDES: [(&str, &str); 8] = [
    (env::DATABASE_URL_ENV_VAR, "postgres.url"),
    (env::PORT_ENV_VAR, "application.port"),
    (env::APP_PUBLIC_URL_ENV_VAR, "application.public_url"),
    (env::FRONTEND_URL_ENV_VAR, "application.frontend_url"),
    (env::ALLOWED_ORIGINS_ENV_VAR, "application.allowed_origins"),
    (env::JWT_SESSION_SECRET_ENV_VAR, "auth.session_secret"),
    (
        env::JWT_VERIFICATION_SECRET_ENV_VAR,
        "auth.verification_secret",
    ),
    (env::POSTMARK_AUTH_TOKEN_ENV_VAR, "email_client.auth_token"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
}

impl Settings {
    /// Load configuration from defaults, an optional `config.json`, and the
    /// environment. The database URL and both JWT secrets have no default;
    /// loading fails fast when they are absent.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("application.host", prod::APP_HOST)?
            .set_default("application.port", prod::APP_PORT as i64)?
            .set_default("application.public_url", "http://localhost:3000")?
            .set_default("application.frontend_url", "http://localhost:5173")?
            .set_default("postgres.max_connections", 10_i64)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_milliseconds",
                prod::email_client::TIMEOUT.as_millis() as i64,
            )?
            .add_source(::config::File::with_name("config").required(false))
            .add_source(
                ::config::Environment::with_prefix("GIGBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Public base URL of this API, used to build verification links.
    pub public_url: String,
    /// Base URL of the SPA, used to build reset links and redirects.
    pub frontend_url: String,
    /// Comma-separated list of allowed CORS origins. `None` disables CORS.
    pub allowed_origins: Option<String>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        self.allowed_origins
            .as_deref()
            .map(AllowedOrigins::from_comma_separated)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub session_secret: Secret<String>,
    pub verification_secret: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn from_comma_separated(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.0.iter().any(|allowed| allowed == origin)
    }
}
