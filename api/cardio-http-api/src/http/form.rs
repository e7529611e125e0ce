use axum::{
    extract::{Path, State},
    response::Html,
};
use cardio_app::domain::variant::FormVariant;

use crate::{
    error::ServiceError,
    http::AppState,
    render::{PageView, render_page},
};

pub async fn default_page(State(state): State<AppState>) -> Html<String> {
    let view = PageView::new(
        state.settings.default_variant,
        state.settings.footer_credit.as_deref(),
    );
    Html(render_page(&view))
}

pub async fn variant_page(
    Path(variant): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>, ServiceError> {
    let variant: FormVariant = variant
        .parse()
        .map_err(|_| ServiceError::NotFound(format!("No page named '{}'", variant)))?;
    let view = PageView::new(variant, state.settings.footer_credit.as_deref());
    Ok(Html(render_page(&view)))
}
