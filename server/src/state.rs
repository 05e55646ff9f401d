//! Application state

use std::sync::Arc;

use periscope_core::{Config, Previewer};

#[derive(Clone)]
pub struct AppState {
    pub previewer: Arc<Previewer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            previewer: Arc::new(Previewer::new(config)),
        }
    }
}
