use axum::{
    Form,
    extract::{Query, State, rejection::FormRejection},
    http::StatusCode,
    response::Html,
};
use cardio_app::domain::vitals::VitalsInput;
use log::{error, warn};

use crate::{
    http::{AppState, VariantQuery, form_rejection_status},
    render::{Notice, NoticeKind, PageView, render_page},
};

pub async fn predict_form(
    State(state): State<AppState>,
    Query(query): Query<VariantQuery>,
    form: Result<Form<VitalsInput>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let variant = query.resolve(&state.settings);
    let mut view = PageView::new(variant, state.settings.footer_credit.as_deref());

    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            warn!("Rejected prediction form: {}", rejection.body_text());
            view.result = Some(Notice::new(NoticeKind::Error, rejection.body_text()));
            return (form_rejection_status(&rejection), Html(render_page(&view)));
        }
    };
    view.values = input.clone();

    let vitals = match input.into_vitals(variant) {
        Ok(vitals) => vitals,
        Err(e) => {
            warn!("Rejected prediction input: {}", e);
            view.result = Some(Notice::new(NoticeKind::Error, e.to_string()));
            return (StatusCode::BAD_REQUEST, Html(render_page(&view)));
        }
    };

    let status = match state.app.predict_use_case.predict(&vitals).await {
        Ok(report) => {
            view.result = Some(Notice::for_prediction(&report.prediction));
            StatusCode::OK
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            view.result = Some(Notice::new(NoticeKind::Error, e.to_string()));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Html(render_page(&view)))
}
