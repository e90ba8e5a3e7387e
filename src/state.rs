//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds only immutable data: the parsed config and the backend client.
//! Request handlers share nothing mutable; the session token travels with
//! each request as an extractor value.

use std::sync::Arc;

use crate::backend::Backend;
use crate::config::Config;

/// Clone is required by Axum; both fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        Self { config: Arc::new(config), backend }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
