use crate::config::Config;
use crate::summary::batch::BatchDriver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the instruction document and the pluggable generator (Gemini in production).
    pub driver: BatchDriver,
    pub config: Config,
}
