use anyhow::Context;
use lettre::message::Mailbox;

/// Where leads are delivered when `CONTACT_RECIPIENT` is not set.
pub const DEFAULT_RECIPIENT: &str = "YOUR_RECEIVER_EMAIL@example.com";
pub const DEFAULT_SENDER: &str = "SSD HOLDING <no-reply@yourdomain.com>";

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Username and password. When absent the relay is used without TLS or auth
    /// (a local MTA), when present STARTTLS is required.
    pub credentials: Option<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub recipient: Mailbox,
    pub sender: Mailbox,
    /// Page the visitor is sent back to after a successful submission.
    pub landing_page: String,
    pub smtp: SmtpSettings,
    pub frontend_dist: String,
    pub port: u16,
}

impl ContactConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let recipient = env_or("CONTACT_RECIPIENT", DEFAULT_RECIPIENT)
            .parse()
            .context("CONTACT_RECIPIENT is not a valid mailbox")?;
        let sender = env_or("CONTACT_SENDER", DEFAULT_SENDER)
            .parse()
            .context("CONTACT_SENDER is not a valid mailbox")?;
        let smtp_port = env_or("SMTP_PORT", "587")
            .parse()
            .context("SMTP_PORT must be a port number")?;
        let credentials = match (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD")) {
            (Ok(user), Ok(pass)) => Some((user, pass)),
            _ => None,
        };
        let port = env_or("PORT", "3000")
            .parse()
            .context("PORT must be a port number")?;

        Ok(Self {
            recipient,
            sender,
            landing_page: env_or("LANDING_PAGE", "/"),
            smtp: SmtpSettings {
                host: env_or("SMTP_HOST", "localhost"),
                port: smtp_port,
                credentials,
            },
            frontend_dist: env_or("FRONTEND_DIST", "frontend/dist"),
            port,
        })
    }

    /// Location header value for the post-submit redirect.
    pub fn contact_redirect(&self) -> String {
        format!("{}#contact", self.landing_page)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
