use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::variant::FormVariant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackMessage(String);

impl FeedbackMessage {
    /// Returns `None` for blank text.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(FeedbackMessage(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Network details of the person leaving feedback, as seen by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SenderInfo {
    pub ip_address: String,
    pub location: String,
}

impl SenderInfo {
    pub fn unknown() -> Self {
        Self {
            ip_address: "Unknown".to_string(),
            location: "Unknown".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackEmail {
    pub id: Uuid,
    pub subject: String,
    pub body: String,
}

impl FeedbackEmail {
    pub fn compose(
        variant: FormVariant,
        message: &FeedbackMessage,
        sender: Option<&SenderInfo>,
        received_at: DateTime<Utc>,
    ) -> Self {
        let mut body = format!(
            "لقد تلقيت رسالة جديدة من تطبيق التنبؤ بأمراض القلب:\n\nالرسالة:\n{}\n",
            message.as_str()
        );
        if variant.includes_sender_info() {
            let sender = sender.cloned().unwrap_or_else(SenderInfo::unknown);
            body.push_str(&format!(
                "\n----------------------------------\nبيانات المُرسل التقنية:\nIP Address: {}\nالموقع التقريبي: {}\n",
                sender.ip_address, sender.location
            ));
        }
        body.push_str(&format!(
            "\nReceived: {}\n",
            received_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        Self {
            id: Uuid::new_v4(),
            subject: variant.feedback_subject().to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_blank_message_is_rejected() {
        assert!(FeedbackMessage::new("").is_none());
        assert!(FeedbackMessage::new("  \n\t").is_none());
        assert_eq!(
            FeedbackMessage::new("  great app \n").map(|m| m.as_str().to_string()),
            Some("great app".to_string())
        );
    }

    #[test]
    fn test_classic_email_includes_sender() {
        let message = FeedbackMessage::new("hello").unwrap();
        let sender = SenderInfo {
            ip_address: "203.0.113.7".into(),
            location: "IQ".into(),
        };
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let email = FeedbackEmail::compose(FormVariant::Classic, &message, Some(&sender), at);
        assert_eq!(email.subject, FormVariant::Classic.feedback_subject());
        assert!(email.body.contains("hello"));
        assert!(email.body.contains("IP Address: 203.0.113.7"));
        assert!(email.body.contains("IQ"));
        assert!(email.body.contains("2025-03-01 12:00:00 UTC"));
    }

    #[test]
    fn test_bilingual_email_omits_sender() {
        let message = FeedbackMessage::new("hello").unwrap();
        let sender = SenderInfo::unknown();
        let email =
            FeedbackEmail::compose(FormVariant::Bilingual, &message, Some(&sender), Utc::now());
        assert!(!email.body.contains("IP Address"));
        assert_eq!(email.subject, FormVariant::Bilingual.feedback_subject());
    }
}
