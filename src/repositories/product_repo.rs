//! In-memory product storage.
//!
//! `ProductStore` is the plain data structure: insertion-ordered products and
//! the next ID to hand out. `ProductRepository` owns one store behind a mutex
//! and runs every operation as a single critical section.

use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductFields, ProductFilter};

/// Products in insertion order plus the ID counter.
#[derive(Debug)]
pub struct ProductStore {
    products: Vec<Product>,
    next_id: i32,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            next_id: 1,
        }
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.products.iter().any(|p| p.product_id == id)
    }

    pub fn find_mut(&mut self, id: i32) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.product_id == id)
    }

    /// Appends a product under the next ID and advances the counter.
    pub fn insert(&mut self, fields: ProductFields) -> AppResult<Product> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| anyhow!("product ID space exhausted at {}", id))?;

        let product = Product {
            product_id: id,
            name: fields.name,
            category: fields.category,
            quantity: fields.quantity,
            price: fields.price,
        };
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn remove(&mut self, id: i32) -> Option<Product> {
        let index = self.products.iter().position(|p| p.product_id == id)?;
        Some(self.products.remove(index))
    }

    /// Returns the number of matches and the requested page, ordered by ID.
    pub fn query(&self, filter: &ProductFilter) -> (usize, Vec<Product>) {
        let mut matches: Vec<&Product> = self.products.iter().filter(|p| filter.matches(p)).collect();
        let total = matches.len();

        matches.sort_by_key(|p| p.product_id);
        let page = matches
            .into_iter()
            .skip(filter.offset())
            .take(filter.limit())
            .cloned()
            .collect();

        (total, page)
    }
}

/// Shared handle to the product store.
///
/// Cloning is cheap and every clone sees the same store.
#[derive(Clone, Default)]
pub struct ProductRepository {
    store: Arc<Mutex<ProductStore>>,
}

impl ProductRepository {
    /// Creates a repository over an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `op` with exclusive access to the store.
    ///
    /// The closure is the whole critical section: checks and mutations made
    /// inside it are atomic with respect to other requests.
    pub fn write<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&mut ProductStore) -> AppResult<T>,
    {
        let mut store = self
            .store
            .lock()
            .map_err(|e| AppError::from(anyhow!("product store lock poisoned: {}", e)))?;
        op(&mut store)
    }

    /// Runs `op` with shared read access to the store.
    pub fn read<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&ProductStore) -> T,
    {
        let store = self
            .store
            .lock()
            .map_err(|e| AppError::from(anyhow!("product store lock poisoned: {}", e)))?;
        Ok(op(&store))
    }

    /// Number of stored products.
    pub fn count(&self) -> AppResult<usize> {
        self.read(ProductStore::len)
    }
}
