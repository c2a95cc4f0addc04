//! Mail adapter that writes outgoing messages to the log

use async_trait::async_trait;
use tracing::{debug, info};

use gasaware_domain::errors::DomainResult;
use gasaware_domain::ports::{MailMessage, Mailer};

/// [`Mailer`] that logs instead of delivering
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> DomainResult<()> {
        info!(to = %message.to, subject = %message.subject, "Outgoing mail");
        debug!(body = %message.body, "Outgoing mail body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_accepts_everything() {
        let message = MailMessage {
            to: "someone@example.com".into(),
            subject: "Hello".into(),
            body: "Body".into(),
        };
        assert!(LogMailer.send(&message).await.is_ok());
    }
}
