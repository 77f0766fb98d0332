//! Outgoing mail.
//!
//! Delivery sits behind [`Mailer`]. [`LogMailer`] writes messages to the log,
//! which is enough for development; [`MemoryMailer`] keeps an outbox that
//! tests can inspect.

use std::sync::Mutex;

use async_trait::async_trait;
use log::info;

use crate::error::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sender used when composing messages.
    fn from_address(&self) -> &str;

    async fn send(&self, email: Email) -> AppResult<()>;

    async fn send_to(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let email = Email {
            from: self.from_address().to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        self.send(email).await
    }
}

pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    fn from_address(&self) -> &str {
        &self.from
    }

    async fn send(&self, email: Email) -> AppResult<()> {
        info!(
            "mail from={} to={} subject={} body={}",
            email.from, email.to, email.subject, email.body
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMailer {
    from: String,
    outbox: Mutex<Vec<Email>>,
}

impl MemoryMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn outbox(&self) -> Vec<Email> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    fn from_address(&self) -> &str {
        &self.from
    }

    async fn send(&self, email: Email) -> AppResult<()> {
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| AppError::Mail("outbox lock poisoned".to_string()))?;
        outbox.push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_mailer_records_messages() {
        let mailer = MemoryMailer::new("noreply@yamdb.local");
        mailer
            .send_to("reader@example.com", "confirmation_code", "abc")
            .await
            .unwrap();

        let outbox = mailer.outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].from, "noreply@yamdb.local");
        assert_eq!(outbox[0].to, "reader@example.com");
        assert_eq!(outbox[0].body, "abc");
    }

    #[tokio::test]
    async fn log_mailer_accepts_everything() {
        let mailer = LogMailer::new("noreply@yamdb.local");
        assert!(mailer.send_to("a@b.c", "s", "b").await.is_ok());
    }
}
