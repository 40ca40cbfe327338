//! Application state for Axum web framework.
//!
//! Contains shared services that are accessible across all request handlers.

use crate::logger::ErrorLog;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since the stores are shared through `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
}

impl AppState {
    /// Creates a new AppState over the given repositories.
    ///
    /// # Example
    /// ```ignore
    /// let state = AppState::new(Repositories::new(), ErrorLog::disabled());
    /// ```
    pub fn new(repos: Repositories, error_log: ErrorLog) -> Self {
        Self {
            services: Services::new(repos, error_log),
        }
    }
}
