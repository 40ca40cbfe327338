//! Product service for business logic operations.
//!
//! Owns the create/list/update/delete rules. Every operation runs as one
//! critical section on the repository, so checks and the mutation they guard
//! can not interleave with another request.

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::logger::ErrorLog;
use crate::models::{DeleteConfirmation, Product, ProductFilter, ProductInput, ProductPage};
use crate::repositories::ProductRepository;

/// Product service.
///
/// Cloning is cheap: the repository and error log are shared handles.
#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
    error_log: ErrorLog,
}

impl ProductService {
    /// Creates a new ProductService with the given repository and error log.
    pub fn new(repo: ProductRepository, error_log: ErrorLog) -> Self {
        Self { repo, error_log }
    }

    /// Creates a product under the next free ID.
    ///
    /// Checks run in order: duplicate ID, price, quantity, then the field
    /// validation pass. The store is untouched unless every check passes.
    pub fn create(&self, input: ProductInput) -> AppResult<Product> {
        let result = self.repo.write(move |store| {
            if store.contains(input.product_id) {
                return Err(AppError::DuplicateId {
                    id: input.product_id,
                });
            }
            check_rules(&input)?;
            store.insert(input.into_fields())
        });

        if let Ok(product) = &result {
            tracing::info!(product_id = product.product_id, "Product created");
        }
        self.report("Error occurred while creating product", result)
    }

    /// Returns the requested page of products matching `filter`.
    pub fn list(&self, filter: ProductFilter) -> AppResult<ProductPage> {
        let result = self
            .repo
            .read(|store| store.query(&filter))
            .map(|(total, data)| ProductPage { total, data });

        self.report("Error occurred while retrieving product list", result)
    }

    /// Overwrites every field of product `id` except its ID.
    pub fn update(&self, id: i32, input: ProductInput) -> AppResult<Product> {
        let result = self.repo.write(move |store| {
            let product = store
                .find_mut(id)
                .ok_or_else(|| AppError::product_not_found(id))?;
            check_rules(&input)?;
            product.apply(input.into_fields());
            Ok(product.clone())
        });

        if result.is_ok() {
            tracing::info!(product_id = id, "Product updated");
        }
        self.report("Error occurred while updating product", result)
    }

    /// Removes product `id`.
    pub fn delete(&self, id: i32) -> AppResult<DeleteConfirmation> {
        let result = self.repo.write(|store| {
            store
                .remove(id)
                .map(|_| DeleteConfirmation::default())
                .ok_or_else(|| AppError::product_not_found(id))
        });

        if result.is_ok() {
            tracing::info!(product_id = id, "Product deleted");
        }
        self.report("Error occurred while deleting product", result)
    }

    /// Number of stored products.
    pub fn count(&self) -> AppResult<usize> {
        self.repo.count()
    }

    /// Sends unexpected failures to the tracing output and the error log.
    fn report<T>(&self, context: &str, result: AppResult<T>) -> AppResult<T> {
        if let Err(error) = &result
            && error.is_internal()
        {
            tracing::error!(error = %error, "{}", context);
            self.error_log.record(format!("{}: {}", context, error));
        }
        result
    }
}

/// Business rules shared by create and update.
fn check_rules(input: &ProductInput) -> AppResult<()> {
    if input.has_negative_price() {
        return Err(AppError::InvalidPrice);
    }
    if input.has_negative_quantity() {
        return Err(AppError::InvalidQuantity);
    }
    input.validate()?;
    Ok(())
}
