use crate::api::{Product, ProductFilter};
use crate::store::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductState {
    /// Current page, exactly as returned for the latest list request.
    pub products: Vec<Product>,
    pub selected_product: Option<Product>,
    pub filter: ProductFilter,
    pub total: u64,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub categories: Vec<String>,
    /// Sequence number of the latest list request. Outcomes tagged with an
    /// older value are stale and ignored.
    pub list_seq: u64,
    /// Same fence for single-product fetches.
    pub detail_seq: u64,
}

impl UiState for ProductState {}

impl ProductState {
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
