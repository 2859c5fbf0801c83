use crate::config::Config;
use crate::interview::service::InterviewService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub interviews: InterviewService,
    pub config: Config,
}
