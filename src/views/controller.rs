use crate::api::{Product, ProductFilter, DEFAULT_PAGE};
use crate::router::Route;
use crate::store::products::{selectors, ProductsIntent};
use crate::store::Store;
use crate::views::{ConfirmDialog, FilterForm};

/// Drives the product list from route changes and user input.
///
/// The list route's query is the source of truth: every change produces a
/// new `/products?...` route, and opening that route sets the store filter,
/// which in turn fetches the page.
#[derive(Clone)]
pub struct ListController {
    store: Store,
}

impl ListController {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Load categories for the filter select.
    pub fn init(&self) {
        self.store.dispatch(ProductsIntent::LoadCategories);
    }

    /// Apply a list route. Returns false for any other route.
    pub fn open(&self, route: &Route) -> bool {
        match route {
            Route::ProductList(filter) => {
                self.store.dispatch(ProductsIntent::SetFilter {
                    filter: filter.clone(),
                });
                true
            }
            _ => false,
        }
    }

    fn current(&self) -> ProductFilter {
        self.store.select(|state| selectors::products_filter(state).clone())
    }

    fn navigate(&self, filter: ProductFilter) -> Route {
        let route = Route::ProductList(filter.normalized());
        self.open(&route);
        route
    }

    /// New search/category values. Goes back to page 1; the page size is kept.
    pub fn apply_filters(&self, form: &FilterForm) -> Route {
        let current = self.current();
        self.navigate(ProductFilter {
            page: DEFAULT_PAGE,
            limit: current.limit,
            category: Some(form.category.clone()),
            search: Some(form.search.clone()),
        })
    }

    /// Jump to `page`, keeping every other parameter.
    pub fn change_page(&self, page: u32) -> Route {
        let current = self.current();
        self.navigate(ProductFilter { page, ..current })
    }

    pub fn next_page(&self) -> Route {
        let current = self.current();
        let last = self.store.select(selectors::products_total_pages).max(1);
        self.change_page((current.page + 1).min(last))
    }

    pub fn previous_page(&self) -> Route {
        let current = self.current();
        self.change_page(current.page.saturating_sub(1).max(DEFAULT_PAGE))
    }

    /// Drop search and category and go back to page 1. The page size is kept.
    pub fn clear_filters(&self) -> Route {
        let current = self.current();
        self.navigate(ProductFilter::with_limit(current.limit))
    }

    /// Ask `confirm` and dispatch the delete only on a yes.
    pub fn delete(&self, product: &Product, confirm: impl FnOnce(&ConfirmDialog) -> bool) -> bool {
        let dialog = ConfirmDialog::delete_product(product);
        if !confirm(&dialog) {
            return false;
        }
        self.store.dispatch(ProductsIntent::DeleteProduct {
            id: product.id.clone(),
        });
        true
    }
}
