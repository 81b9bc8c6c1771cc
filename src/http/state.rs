use crate::llm::TextGenerator;
use crate::session::SessionRegistry;
use std::sync::Arc;

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    /// Live sessions and finalized meeting records
    pub registry: Arc<SessionRegistry>,

    /// Summary generator, if an LLM is configured
    pub llm: Option<Arc<dyn TextGenerator>>,

    /// Service name reported by the root health endpoint
    pub service_name: String,

    /// Request body limit for uploads
    pub upload_max_bytes: usize,
}

impl AppState {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            llm: None,
            service_name: "VisiSec Backend".to_string(),
            upload_max_bytes: crate::config::UploadConfig::default().max_bytes,
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn TextGenerator>) -> Self {
        self.llm = Some(llm);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(SessionRegistry::default()))
    }
}
