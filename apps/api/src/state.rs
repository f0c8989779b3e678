use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::screening::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence for résumé records. Postgres in production.
    pub store: Arc<dyn ResumeStore>,
    pub analyzer: ResumeAnalyzer,
    pub config: Config,
}
