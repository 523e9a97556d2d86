use std::sync::Arc;

use crate::auth::JwtService;
use crate::screening::extractor::ResumeExtractor;
use crate::screening::profile::StandardProfileGenerator;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    /// LLM-backed or placeholder, chosen at startup from `ANTHROPIC_API_KEY`.
    pub extractor: Arc<dyn ResumeExtractor>,
    pub profiles: Arc<dyn StandardProfileGenerator>,
    pub jwt: Arc<JwtService>,
}
