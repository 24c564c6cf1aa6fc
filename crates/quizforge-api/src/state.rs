use std::sync::Arc;
use std::time::Duration;

use quizforge_llm::Generator;
use quizforge_store::ThreadStore;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn Generator>,
    pub thread_store: Arc<dyn ThreadStore>,
    pub search_timeout: Duration,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn Generator>,
        thread_store: Arc<dyn ThreadStore>,
        search_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            thread_store,
            search_timeout,
        }
    }
}
