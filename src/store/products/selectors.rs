//! Read-only projections of the products slice.

use crate::api::{Product, ProductFilter};
use crate::store::products::state::ProductState;
use crate::store::AppState;

pub fn products_state(state: &AppState) -> &ProductState {
    &state.products
}

pub fn products(state: &AppState) -> &[Product] {
    &products_state(state).products
}

pub fn selected_product(state: &AppState) -> Option<&Product> {
    products_state(state).selected_product.as_ref()
}

pub fn products_loading(state: &AppState) -> bool {
    products_state(state).loading
}

pub fn products_error(state: &AppState) -> Option<&str> {
    products_state(state).error.as_deref()
}

pub fn products_filter(state: &AppState) -> &ProductFilter {
    &products_state(state).filter
}

pub fn products_total(state: &AppState) -> u64 {
    products_state(state).total
}

pub fn products_total_pages(state: &AppState) -> u32 {
    products_state(state).total_pages
}

pub fn categories(state: &AppState) -> &[String] {
    &products_state(state).categories
}

pub fn current_page(state: &AppState) -> u32 {
    products_filter(state).page
}

pub fn products_per_page(state: &AppState) -> u32 {
    products_filter(state).limit
}

pub fn search_term(state: &AppState) -> &str {
    products_filter(state).search.as_deref().unwrap_or("")
}

pub fn category_filter(state: &AppState) -> &str {
    products_filter(state).category.as_deref().unwrap_or("")
}

pub fn has_active_filters(state: &AppState) -> bool {
    products_filter(state).has_active_filters()
}

/// Look a product up in the current page only.
pub fn product_by_id<'a>(state: &'a AppState, id: &str) -> Option<&'a Product> {
    products_state(state).find(id)
}
