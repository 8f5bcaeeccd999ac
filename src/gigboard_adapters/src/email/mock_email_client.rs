use std::sync::Arc;

use gigboard_core::{Email, EmailClient};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub content: String,
}

/// Email client that records instead of sending. Development runs and the
/// API test suite read tokens back out of `sent()`.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }

    pub async fn sent_to(&self, recipient: &Email) -> Vec<SentEmail> {
        self.outbox
            .read()
            .await
            .iter()
            .filter(|email| &email.recipient == recipient)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
