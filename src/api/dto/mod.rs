//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `product` - Product request parameters
//! - `health` - Health check response
//! - `error` - Common error response DTOs

mod error;
mod health;
mod product;

pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use product::IdParams;

pub use crate::models::{DeleteConfirmation, Product, ProductFilter, ProductInput, ProductPage};
