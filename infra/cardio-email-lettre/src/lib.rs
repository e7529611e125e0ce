use std::{str::FromStr, time::Duration};

use cardio_app::ports::email::{EmailCredentials, EmailPort, OutgoingEmail, SendEmailError};
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use log::debug;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Sends mail over a TLS SMTP relay, opening one session per message with
/// the credentials supplied by the caller. Port 465 speaks TLS from the first
/// byte; any other port is upgraded with STARTTLS.
pub struct LettreEmailAdapter {
    host: String,
    port: u16,
}

impl LettreEmailAdapter {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn uses_implicit_tls(&self) -> bool {
        self.port == DEFAULT_SMTP_PORT
    }
}

impl Default for LettreEmailAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT)
    }
}

fn build_message(from: &str, email: &OutgoingEmail) -> Result<Message, SendEmailError> {
    let from = Mailbox::from_str(from)
        .map_err(|e| SendEmailError::InvalidAddress(format!("from '{}': {}", from, e)))?;
    let to = Mailbox::from_str(&email.to)
        .map_err(|e| SendEmailError::InvalidAddress(format!("to '{}': {}", email.to, e)))?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| SendEmailError::Build(e.to_string()))
}

impl EmailPort for LettreEmailAdapter {
    fn send_email(
        &self,
        credentials: &EmailCredentials,
        email: &OutgoingEmail,
    ) -> Result<(), SendEmailError> {
        let message = build_message(&credentials.address, email)?;
        let builder = if self.uses_implicit_tls() {
            SmtpTransport::relay(&self.host)
        } else {
            SmtpTransport::starttls_relay(&self.host)
        };
        let transport = builder
            .map_err(|e| SendEmailError::Transport(format!("failed to create transport: {}", e)))?
            .port(self.port)
            .timeout(Some(SMTP_TIMEOUT))
            .credentials(Credentials::new(
                credentials.address.clone(),
                credentials.password.clone(),
            ))
            .build();
        debug!(
            "Sending email via {}:{} ({})",
            self.host,
            self.port,
            if self.uses_implicit_tls() { "TLS" } else { "STARTTLS" }
        );
        transport
            .send(&message)
            .map_err(|e| SendEmailError::Transport(e.to_string()))?;
        Ok(())
    }
}
