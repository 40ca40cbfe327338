//! Repository layer for data access operations.
//!
//! Stores live in process memory for the lifetime of the server.

mod product_repo;

pub use product_repo::{ProductRepository, ProductStore};

/// Aggregates all repositories for convenient access.
///
/// Each repository is a shared handle, so cloning is cheap.
#[derive(Clone, Default)]
pub struct Repositories {
    pub products: ProductRepository,
}

impl Repositories {
    /// Creates a new Repositories instance over empty stores.
    pub fn new() -> Self {
        Self::default()
    }
}
