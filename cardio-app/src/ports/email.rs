use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct EmailCredentials {
    pub address: String,
    pub password: String,
}

impl fmt::Debug for EmailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailCredentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub trait EmailPort {
    /// Delivers one message, authenticating with `credentials`. Blocking.
    fn send_email(
        &self,
        credentials: &EmailCredentials,
        email: &OutgoingEmail,
    ) -> Result<(), SendEmailError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendEmailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("failed to build email: {0}")]
    Build(String),
    #[error("failed to send email: {0}")]
    Transport(String),
}
