use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};

use crate::{
    domain::{
        feedback::{FeedbackEmail, FeedbackMessage, SenderInfo},
        variant::FormVariant,
    },
    ports::{
        email::{EmailCredentials, EmailPort, OutgoingEmail, SendEmailError},
        secrets::{EMAIL_SECRET, PASSWORD_SECRET, SecretsPort},
    },
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback message is empty")]
    EmptyMessage,
    #[error("email secrets are not configured")]
    MissingSecrets,
    #[error(transparent)]
    Send(#[from] SendEmailError),
    #[error("internal error: {0}")]
    Internal(String),
}

#[async_trait::async_trait]
pub trait SendFeedbackUseCase {
    async fn send_feedback(
        &self,
        variant: FormVariant,
        text: &str,
        sender: Option<SenderInfo>,
    ) -> Result<(), FeedbackError>;
}

pub struct SendFeedbackUseCaseImpl<S: SecretsPort, E: EmailPort> {
    secrets: Arc<S>,
    email_port: Arc<E>,
}

impl<S: SecretsPort, E: EmailPort> SendFeedbackUseCaseImpl<S, E> {
    pub fn new(secrets: Arc<S>, email_port: Arc<E>) -> Self {
        Self {
            secrets,
            email_port,
        }
    }

    fn credentials(&self) -> Option<EmailCredentials> {
        let address = self.secrets.get(EMAIL_SECRET)?;
        let password = self.secrets.get(PASSWORD_SECRET)?;
        Some(EmailCredentials { address, password })
    }
}

#[async_trait::async_trait]
impl<S, E> SendFeedbackUseCase for SendFeedbackUseCaseImpl<S, E>
where
    S: SecretsPort + Send + Sync + 'static,
    E: EmailPort + Send + Sync + 'static,
{
    async fn send_feedback(
        &self,
        variant: FormVariant,
        text: &str,
        sender: Option<SenderInfo>,
    ) -> Result<(), FeedbackError> {
        let Some(message) = FeedbackMessage::new(text) else {
            return Err(FeedbackError::EmptyMessage);
        };
        let Some(credentials) = self.credentials() else {
            warn!("Feedback dropped: email secrets are not configured");
            return Err(FeedbackError::MissingSecrets);
        };

        let composed = FeedbackEmail::compose(variant, &message, sender.as_ref(), Utc::now());
        let feedback_id = composed.id;
        // Messages go to the sending account itself.
        let outgoing = OutgoingEmail {
            to: credentials.address.clone(),
            subject: composed.subject,
            body: composed.body,
        };

        let email_port = self.email_port.clone();
        let result =
            tokio::task::spawn_blocking(move || email_port.send_email(&credentials, &outgoing))
                .await
                .map_err(|e| FeedbackError::Internal(format!("email task failed: {}", e)))?;

        match result {
            Ok(()) => {
                info!("Feedback {} sent ({} variant)", feedback_id, variant);
                Ok(())
            }
            Err(e) => {
                error!("Feedback {} could not be sent: {}", feedback_id, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    struct MockSecrets(HashMap<&'static str, &'static str>);

    impl SecretsPort for MockSecrets {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[derive(Default)]
    struct MockEmail {
        fail: bool,
        sent: Mutex<Vec<(EmailCredentials, OutgoingEmail)>>,
    }

    impl EmailPort for MockEmail {
        fn send_email(
            &self,
            credentials: &EmailCredentials,
            email: &OutgoingEmail,
        ) -> Result<(), SendEmailError> {
            if self.fail {
                return Err(SendEmailError::Transport("connection refused".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((credentials.clone(), email.clone()));
            Ok(())
        }
    }

    fn full_secrets() -> Arc<MockSecrets> {
        Arc::new(MockSecrets(HashMap::from([
            (EMAIL_SECRET, "owner@example.com"),
            (PASSWORD_SECRET, "app-password"),
        ])))
    }

    #[tokio::test]
    async fn test_feedback_is_sent_to_owner() {
        let email = Arc::new(MockEmail::default());
        let use_case = SendFeedbackUseCaseImpl::new(full_secrets(), email.clone());

        let sender = SenderInfo {
            ip_address: "198.51.100.2".into(),
            location: "Unknown".into(),
        };
        use_case
            .send_feedback(FormVariant::Classic, "nice work", Some(sender))
            .await
            .unwrap();

        let sent = email.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (credentials, message) = &sent[0];
        assert_eq!(credentials.address, "owner@example.com");
        assert_eq!(credentials.password, "app-password");
        assert_eq!(message.to, "owner@example.com");
        assert!(message.body.contains("nice work"));
        assert!(message.body.contains("198.51.100.2"));
    }

    #[tokio::test]
    async fn test_empty_feedback_is_not_sent() {
        let email = Arc::new(MockEmail::default());
        let use_case = SendFeedbackUseCaseImpl::new(full_secrets(), email.clone());
        let result = use_case
            .send_feedback(FormVariant::Bilingual, "   ", None)
            .await;
        assert_eq!(result, Err(FeedbackError::EmptyMessage));
        assert!(email.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_password_is_reported() {
        let secrets = Arc::new(MockSecrets(HashMap::from([(
            EMAIL_SECRET,
            "owner@example.com",
        )])));
        let email = Arc::new(MockEmail::default());
        let use_case = SendFeedbackUseCaseImpl::new(secrets, email.clone());
        let result = use_case
            .send_feedback(FormVariant::Classic, "hi", None)
            .await;
        assert_eq!(result, Err(FeedbackError::MissingSecrets));
        assert!(email.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let email = Arc::new(MockEmail {
            fail: true,
            ..Default::default()
        });
        let use_case = SendFeedbackUseCaseImpl::new(full_secrets(), email);
        let result = use_case
            .send_feedback(FormVariant::Bilingual, "hi", None)
            .await;
        assert!(matches!(
            result,
            Err(FeedbackError::Send(SendEmailError::Transport(_)))
        ));
    }
}
