//! Plain-text rendering of store state.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::api::{Product, ProductFilter};
use crate::store::products::ProductState;
use crate::store::{Notification, NotificationLevel};

const LOADING: &str = "Loading products...";

fn price(value: f64) -> String {
    format!("${value:.2}")
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One list row: name, price and category, then the description.
pub fn product_card(product: &Product) -> String {
    let mut out = format!(
        "{}  {}  [{}]  ({})",
        product.name,
        price(product.price),
        product.category,
        product.id
    );
    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, "\n    {description}");
    }
    out
}

pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(out, "  Price:       {}", price(product.price));
    let _ = writeln!(out, "  Category:    {}", product.category);
    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  Description: {description}");
    }
    let _ = writeln!(out, "  ID:          {}", product.id);
    let _ = writeln!(out, "  Created:     {}", timestamp(product.created_at));
    let _ = write!(out, "  Updated:     {}", timestamp(product.updated_at));
    out
}

pub fn empty_state(filters_active: bool) -> String {
    let detail = if filters_active {
        "No products match the active filters."
    } else {
        "The catalog has no products yet. Create the first one with `catalog products create`."
    };
    format!("No products found.\n{detail}")
}

/// `Showing 11-20 of 25 (page 2 of 3)`.
pub fn pagination_summary(state: &ProductState) -> String {
    let page = state.filter.page.max(1) as u64;
    let limit = state.filter.limit.max(1) as u64;
    let first = (page - 1) * limit + 1;
    let last = first + state.products.len() as u64 - 1;
    format!(
        "Showing {first}-{last} of {} (page {page} of {})",
        state.total,
        state.total_pages.max(1)
    )
}

pub fn active_filters(filter: &ProductFilter) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("search \"{search}\""));
    }
    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("category {category}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Active filters: {}", parts.join(", ")))
    }
}

/// The whole list screen.
pub fn product_list(state: &ProductState) -> String {
    if state.loading {
        return LOADING.to_string();
    }

    let mut out = String::new();
    if let Some(filters) = active_filters(&state.filter) {
        let _ = writeln!(out, "{filters}");
    }
    if state.products.is_empty() {
        out.push_str(&empty_state(state.filter.has_active_filters()));
        return out;
    }
    for product in &state.products {
        let _ = writeln!(out, "{}", product_card(product));
    }
    out.push_str(&pagination_summary(state));
    out
}

pub fn notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}
