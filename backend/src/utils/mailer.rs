use anyhow::Context;
use futures::future::BoxFuture;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpSettings;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Mail delivery rejected: {0}")]
    Rejected(String),
}

/// Outbound transport for composed lead messages.
///
/// One call is one delivery attempt; implementations must not retry.
#[cfg_attr(test, mockall::automock)]
pub trait LeadMailer: Send + Sync {
    fn deliver(&self, message: Message) -> BoxFuture<'static, Result<(), MailError>>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> anyhow::Result<Self> {
        let transport = match &settings.credentials {
            Some((username, password)) => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                    .with_context(|| format!("Failed to create SMTP relay for {}", settings.host))?
                    .port(settings.port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build()
            }
            None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                .port(settings.port)
                .build(),
        };
        tracing::info!(
            "SMTP configuration - Server: {}, Port: {}, Authenticated: {}",
            settings.host,
            settings.port,
            settings.credentials.is_some()
        );
        Ok(Self { transport })
    }
}

impl LeadMailer for SmtpMailer {
    fn deliver(&self, message: Message) -> BoxFuture<'static, Result<(), MailError>> {
        let transport = self.transport.clone();
        Box::pin(async move {
            let response = transport.send(message).await?;
            if response.is_positive() {
                Ok(())
            } else {
                Err(MailError::Rejected(format!("{:?}", response.code())))
            }
        })
    }
}
