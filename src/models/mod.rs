mod product;

pub use product::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DELETE_CONFIRMATION, DeleteConfirmation, Product,
    ProductFields, ProductFilter, ProductInput, ProductPage,
};
