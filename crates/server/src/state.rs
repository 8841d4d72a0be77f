use std::sync::Arc;

use seedfin_metadata::Resolver;

/// Shared application state passed to all handlers. Read-only.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}
