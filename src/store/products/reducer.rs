use crate::api::ProductFilter;
use crate::store::mvi::Reducer;
use crate::store::products::intent::ProductsIntent;
use crate::store::products::state::ProductState;

pub struct ProductsReducer;

impl Reducer for ProductsReducer {
    type State = ProductState;
    type Intent = ProductsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProductsIntent::LoadProducts { filter } => ProductState {
                filter: filter.normalized(),
                list_seq: state.list_seq + 1,
                ..begin(state)
            },
            ProductsIntent::ProductsLoaded {
                seq,
                products,
                total,
                total_pages,
            } => {
                if seq != state.list_seq {
                    tracing::debug!(seq, current = state.list_seq, "Dropping stale product page");
                    return state;
                }
                ProductState {
                    products,
                    total,
                    total_pages,
                    ..finish(state)
                }
            }
            ProductsIntent::LoadProductsFailed { seq, error } => {
                if seq != state.list_seq {
                    return state;
                }
                fail(state, error)
            }

            ProductsIntent::LoadProduct { .. } => ProductState {
                detail_seq: state.detail_seq + 1,
                ..begin(state)
            },
            ProductsIntent::ProductLoaded { seq, product } => {
                if seq != state.detail_seq {
                    tracing::debug!(seq, current = state.detail_seq, "Dropping stale product");
                    return state;
                }
                ProductState {
                    selected_product: Some(product),
                    ..finish(state)
                }
            }
            ProductsIntent::LoadProductFailed { seq, error } => {
                if seq != state.detail_seq {
                    return state;
                }
                fail(state, error)
            }

            ProductsIntent::CreateProduct { .. }
            | ProductsIntent::UpdateProduct { .. }
            | ProductsIntent::DeleteProduct { .. } => begin(state),

            ProductsIntent::ProductCreated { product } => {
                let mut state = finish(state);
                state.products.insert(0, product);
                state.total += 1;
                state
            }
            ProductsIntent::ProductUpdated { product } => {
                let mut state = finish(state);
                if let Some(existing) = state.products.iter_mut().find(|p| p.id == product.id) {
                    *existing = product.clone();
                }
                state.selected_product = Some(product);
                state
            }
            ProductsIntent::ProductDeleted { id } => {
                let mut state = finish(state);
                state.products.retain(|p| p.id != id);
                state.total = state.total.saturating_sub(1);
                if state
                    .selected_product
                    .as_ref()
                    .is_some_and(|selected| selected.id == id)
                {
                    state.selected_product = None;
                }
                state
            }
            ProductsIntent::CreateProductFailed { error }
            | ProductsIntent::UpdateProductFailed { error }
            | ProductsIntent::DeleteProductFailed { error } => fail(state, error),

            // Categories never touch `loading`; the list owns that flag.
            ProductsIntent::LoadCategories => state,
            ProductsIntent::CategoriesLoaded { categories } => ProductState {
                categories,
                ..state
            },
            ProductsIntent::LoadCategoriesFailed { error } => ProductState {
                error: Some(error),
                ..state
            },

            ProductsIntent::SetFilter { filter } => ProductState {
                filter: filter.normalized(),
                ..state
            },
            ProductsIntent::ClearFilter => ProductState {
                filter: ProductFilter::default(),
                ..state
            },
            ProductsIntent::SelectProduct { product } => ProductState {
                selected_product: product,
                ..state
            },
            ProductsIntent::ClearError => ProductState {
                error: None,
                ..state
            },
        }
    }
}

fn begin(state: ProductState) -> ProductState {
    ProductState {
        loading: true,
        error: None,
        ..state
    }
}

fn finish(state: ProductState) -> ProductState {
    ProductState {
        loading: false,
        error: None,
        ..state
    }
}

fn fail(state: ProductState, error: String) -> ProductState {
    ProductState {
        loading: false,
        error: Some(error),
        ..state
    }
}
