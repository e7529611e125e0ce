pub mod error;
pub mod http;
pub mod render;

pub use http::{AppState, MAX_BODY_BYTES, PageSettings, router, run};
