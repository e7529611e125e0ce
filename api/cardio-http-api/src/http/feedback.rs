use std::net::SocketAddr;

use axum::{
    Form,
    extract::{ConnectInfo, Query, State, rejection::FormRejection},
    http::{Extensions, HeaderMap, StatusCode},
    response::Html,
};
use cardio_app::{domain::feedback::SenderInfo, workflow::feedback::FeedbackError};
use log::warn;
use serde::Deserialize;

use crate::{
    error::ServiceError,
    http::{AppState, VariantQuery, form_rejection_status},
    render::{EMPTY_FEEDBACK, FEEDBACK_SENT, Notice, NoticeKind, PageView, render_page},
};

#[derive(Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    message: String,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Client address and rough location as seen through any reverse proxy.
pub(crate) fn sender_info(headers: &HeaderMap, extensions: &Extensions) -> SenderInfo {
    let forwarded = header_value(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty());
    let ip_address = forwarded
        .or_else(|| header_value(headers, "x-real-ip"))
        .or_else(|| {
            extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });
    let location = header_value(headers, "cf-ipcountry");
    let unknown = SenderInfo::unknown();
    SenderInfo {
        ip_address: ip_address.unwrap_or(unknown.ip_address),
        location: location.unwrap_or(unknown.location),
    }
}

pub async fn send_feedback(
    State(state): State<AppState>,
    Query(query): Query<VariantQuery>,
    headers: HeaderMap,
    extensions: Extensions,
    form: Result<Form<FeedbackForm>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let variant = query.resolve(&state.settings);
    let mut view = PageView::new(variant, state.settings.footer_credit.as_deref());

    let message = match form {
        Ok(Form(form)) => form.message,
        Err(rejection) => {
            warn!("Rejected feedback form: {}", rejection.body_text());
            view.feedback = Some(Notice::new(NoticeKind::Error, rejection.body_text()));
            return (form_rejection_status(&rejection), Html(render_page(&view)));
        }
    };

    let sender = variant
        .includes_sender_info()
        .then(|| sender_info(&headers, &extensions));

    let result = state
        .app
        .send_feedback_use_case
        .send_feedback(variant, &message, sender)
        .await;

    let status = match result {
        Ok(()) => {
            view.feedback = Some(Notice::new(NoticeKind::Success, FEEDBACK_SENT));
            StatusCode::OK
        }
        Err(e) => {
            let status = ServiceError::from(e.clone()).status();
            let notice = match e {
                FeedbackError::EmptyMessage => Notice::new(NoticeKind::Warning, EMPTY_FEEDBACK),
                FeedbackError::MissingSecrets => {
                    Notice::new(NoticeKind::Error, variant.missing_secrets_message())
                }
                FeedbackError::Send(_) | FeedbackError::Internal(_) => Notice::new(
                    NoticeKind::Error,
                    format!("{}: {}", variant.send_failure_prefix(), e),
                ),
            };
            // Keep the text so the visitor can retry by hand.
            view.feedback_text = &message;
            view.feedback = Some(notice);
            status
        }
    };
    (status, Html(render_page(&view)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        headers.insert("cf-ipcountry", "IQ".parse().unwrap());
        let info = sender_info(&headers, &Extensions::new());
        assert_eq!(info.ip_address, "203.0.113.9");
        assert_eq!(info.location, "IQ");
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo("192.0.2.4:51234".parse::<SocketAddr>().unwrap()));
        let info = sender_info(&HeaderMap::new(), &extensions);
        assert_eq!(info.ip_address, "192.0.2.4");
        assert_eq!(info.location, "Unknown");
    }

    #[test]
    fn test_unknown_without_any_source() {
        assert_eq!(
            sender_info(&HeaderMap::new(), &Extensions::new()),
            SenderInfo::unknown()
        );
    }
}
