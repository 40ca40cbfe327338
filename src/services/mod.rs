//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod product_service;

pub use product_service::ProductService;

use crate::logger::ErrorLog;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the repositories share their stores through `Arc`.
#[derive(Clone)]
pub struct Services {
    pub products: ProductService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, error_log: ErrorLog) -> Self {
        Self {
            products: ProductService::new(repos.products, error_log),
        }
    }
}
