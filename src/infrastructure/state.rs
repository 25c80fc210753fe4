//! Application state shared across all handlers

use crate::services::Dataplane;

#[derive(Clone)]
pub struct AppState {
    pub dataplane: Dataplane,
}

impl AppState {
    pub fn new(dataplane: Dataplane) -> Self {
        Self { dataplane }
    }
}

impl axum::extract::FromRef<AppState> for Dataplane {
    fn from_ref(state: &AppState) -> Self {
        state.dataplane.clone()
    }
}
