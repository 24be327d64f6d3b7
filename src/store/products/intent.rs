use crate::api::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::store::mvi::Intent;

/// Product intents.
///
/// Outcomes of list and detail fetches carry the `seq` of the request that
/// produced them; see [`ProductState::list_seq`](super::ProductState::list_seq).
#[derive(Debug, Clone)]
pub enum ProductsIntent {
    LoadProducts { filter: ProductFilter },
    ProductsLoaded {
        seq: u64,
        products: Vec<Product>,
        total: u64,
        total_pages: u32,
    },
    LoadProductsFailed { seq: u64, error: String },

    LoadProduct { id: String },
    ProductLoaded { seq: u64, product: Product },
    LoadProductFailed { seq: u64, error: String },

    CreateProduct { product: NewProduct },
    ProductCreated { product: Product },
    CreateProductFailed { error: String },

    UpdateProduct { id: String, patch: ProductPatch },
    ProductUpdated { product: Product },
    UpdateProductFailed { error: String },

    DeleteProduct { id: String },
    ProductDeleted { id: String },
    DeleteProductFailed { error: String },

    LoadCategories,
    CategoriesLoaded { categories: Vec<String> },
    LoadCategoriesFailed { error: String },

    /// Replace the active filter. Triggers a list fetch.
    SetFilter { filter: ProductFilter },
    /// Restore the default filter. Triggers a list fetch.
    ClearFilter,
    SelectProduct { product: Option<Product> },
    ClearError,
}

impl Intent for ProductsIntent {}
