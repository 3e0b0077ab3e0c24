use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::screening::scoring::CandidateScorer;
use crate::store::JsonStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub config: Config,
    /// Pluggable candidate scorer. Default: WeightedScorer.
    pub scorer: Arc<dyn CandidateScorer>,
    /// Resume chat model. `None` when no GOOGLE_API_KEY is configured.
    pub chat: Option<Arc<dyn ChatModel>>,
}
