use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::utils::query;

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Product record as held by the store.
///
/// `product_id` is assigned by the store on create and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    #[schema(example = 1)]
    pub product_id: i32,
    #[schema(example = "Keyboard")]
    pub name: String,
    #[schema(example = "Peripherals")]
    pub category: String,
    #[schema(example = 12)]
    pub quantity: i32,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64, example = 49.99)]
    pub price: BigDecimal,
}

impl Product {
    /// Overwrites every mutable field, leaving `product_id` untouched.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.category = fields.category;
        self.quantity = fields.quantity;
        self.price = fields.price;
    }
}

/// Product payload accepted by create and update.
///
/// Fields the client omits fall back to their zero values, and a `null` name or
/// category reads as blank, so that the validation pass reports them instead of
/// the body being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInput {
    /// Only consulted for the duplicate check on create; the store assigns the real ID.
    #[serde(rename = "ProductID", default)]
    #[schema(example = 0)]
    pub product_id: i32,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Keyboard")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Peripherals")]
    pub category: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "The field Quantity must be between 0 and 2147483647."))]
    #[schema(minimum = 0, example = 12)]
    pub quantity: i32,

    #[serde(default, with = "bigdecimal::serde::json_num")]
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = f64, minimum = 0, example = 49.99)]
    pub price: BigDecimal,
}

impl ProductInput {
    pub fn has_negative_price(&self) -> bool {
        self.price < BigDecimal::zero()
    }

    pub fn has_negative_quantity(&self) -> bool {
        self.quantity < 0
    }

    /// Splits off the fields that are written to the store.
    pub fn into_fields(self) -> ProductFields {
        ProductFields {
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// The writable part of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductPage {
    /// Number of products matching the filter, before pagination
    #[schema(example = 42)]
    pub total: usize,
    pub data: Vec<Product>,
}

pub const DELETE_CONFIRMATION: &str = "Product deleted successfully";

/// Acknowledgement returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self {
            message: DELETE_CONFIRMATION.to_string(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn non_negative(value: &BigDecimal) -> Result<(), ValidationError> {
    if *value < BigDecimal::zero() {
        return Err(ValidationError::new("range"));
    }
    Ok(())
}

/// Query descriptor for the list operation.
///
/// Blank query values (`?Category=&Page=`) are treated as if the key was absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "PascalCase")]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive exact category match
    #[serde(default, deserialize_with = "query::blank_as_none")]
    #[param(example = "Peripherals")]
    pub category: Option<String>,

    /// Inclusive lower price bound
    #[serde(default, deserialize_with = "query::blank_as_none")]
    #[param(value_type = Option<f64>, example = 10)]
    pub min_price: Option<BigDecimal>,

    /// Inclusive upper price bound
    #[serde(default, deserialize_with = "query::blank_as_none")]
    #[param(value_type = Option<f64>, example = 100)]
    pub max_price: Option<BigDecimal>,

    /// Page number (1-based)
    #[serde(default = "default_page", deserialize_with = "page_or_default")]
    #[param(example = 1)]
    pub page: i32,

    /// Number of items per page
    #[serde(default = "default_page_size", deserialize_with = "page_size_or_default")]
    #[param(example = 10)]
    pub page_size: i32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            min_price: None,
            max_price: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductFilter {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<BigDecimal>, max: Option<BigDecimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_page(mut self, page: i32, page_size: i32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Applies the category, minimum price and maximum price conditions, in that order.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty())
            && product.category.to_lowercase() != category.to_lowercase()
        {
            return false;
        }
        if let Some(min) = &self.min_price
            && product.price < *min
        {
            return false;
        }
        if let Some(max) = &self.max_price
            && product.price > *max
        {
            return false;
        }
        true
    }

    /// Number of matches skipped before the page starts. Pages below 1 read as page 1.
    pub fn offset(&self) -> usize {
        let page = usize::try_from(self.page.max(1)).unwrap_or(1);
        (page - 1).saturating_mul(self.limit())
    }

    /// Page length. A page size below 1 yields an empty page.
    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(0)
    }
}

fn default_page() -> i32 {
    DEFAULT_PAGE
}

fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}

fn page_or_default<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(query::blank_as_none(deserializer)?.unwrap_or(DEFAULT_PAGE))
}

fn page_size_or_default<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(query::blank_as_none(deserializer)?.unwrap_or(DEFAULT_PAGE_SIZE))
}
