use std::sync::Arc;

use sprig_config::Config;
use sprig_docs::DocumentSet;
use sprig_llm::TextGenerator;
use sprig_store::ConversationStore;

use crate::middleware::rate_limit::RateLimiter;

/// Shared application state, created in main and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub docs: Arc<DocumentSet>,
    pub store: Arc<dyn ConversationStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub limiter: Arc<RateLimiter>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        docs: Arc<DocumentSet>,
        store: Arc<dyn ConversationStore>,
        generator: Arc<dyn TextGenerator>,
        limiter: Arc<RateLimiter>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            docs,
            store,
            generator,
            limiter,
            config,
        }
    }
}
