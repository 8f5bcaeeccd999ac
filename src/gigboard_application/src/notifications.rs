use gigboard_core::{Email, EmailClient};

/// Composes and sends the transactional emails the account subsystem
/// produces. Delivery is best-effort: a failed send is logged and never
/// fails the request that triggered it.
#[derive(Debug, Clone)]
pub struct NotificationSender<E> {
    email_client: E,
    public_api_url: String,
    frontend_url: String,
}

impl<E> NotificationSender<E>
where
    E: EmailClient,
{
    pub fn new(email_client: E, public_api_url: String, frontend_url: String) -> Self {
        Self {
            email_client,
            public_api_url: public_api_url.trim_end_matches('/').to_string(),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    /// The clickable variant of the verification endpoint, served by this
    /// API so the link works straight from an email client.
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/api/verify-email/{}", self.public_api_url, token)
    }

    /// Reset links land on the frontend, which collects the new password
    /// and posts it together with the token.
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.frontend_url, token)
    }

    #[tracing::instrument(name = "Sending verification email", skip_all, fields(recipient = %recipient))]
    pub async fn send_verification_email(&self, recipient: &Email, token: &str) {
        let link = self.verification_link(token);
        let content = format!(
            "Welcome to GigBoard!\n\n\
             Please confirm your email address by opening the link below:\n\n\
             {link}\n\n\
             The link expires in 24 hours. If you did not create an account, \
             you can ignore this email."
        );
        self.deliver(recipient, "Verify your email address", &content)
            .await;
    }

    #[tracing::instrument(name = "Sending password reset email", skip_all, fields(recipient = %recipient))]
    pub async fn send_reset_email(&self, recipient: &Email, token: &str) {
        let link = self.reset_link(token);
        let content = format!(
            "We received a request to reset the password for your GigBoard \
             account.\n\n\
             You can choose a new password here:\n\n\
             {link}\n\n\
             The link expires in 1 hour. If you did not request a reset, you \
             can ignore this email and your password will stay unchanged."
        );
        self.deliver(recipient, "Reset your password", &content).await;
    }

    #[tracing::instrument(name = "Sending login alert", skip_all, fields(recipient = %recipient))]
    pub async fn send_login_alert(&self, recipient: &Email, location: Option<&str>) {
        let content = match location {
            Some(location) => format!(
                "We noticed a new login to your GigBoard account from \
                 {location}.\n\n\
                 If this was you, no action is needed. If not, please reset \
                 your password immediately."
            ),
            None => "We noticed a new login to your GigBoard account.\n\n\
                     If this was you, no action is needed. If not, please \
                     reset your password immediately."
                .to_string(),
        };
        self.deliver(recipient, "New login to your account", &content)
            .await;
    }

    #[tracing::instrument(name = "Sending password changed notice", skip_all, fields(recipient = %recipient))]
    pub async fn send_password_changed(&self, recipient: &Email) {
        let content = "The password for your GigBoard account was just \
                       changed.\n\n\
                       If this was not you, please request a new password \
                       reset right away."
            .to_string();
        self.deliver(recipient, "Your password was changed", &content)
            .await;
    }

    async fn deliver(&self, recipient: &Email, subject: &str, content: &str) {
        if let Err(error) = self
            .email_client
            .send_email(recipient, subject, content)
            .await
        {
            tracing::warn!(%error, subject, "failed to send notification email");
        }
    }
}
