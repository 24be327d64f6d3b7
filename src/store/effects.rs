//! Side effects triggered by intents.
//!
//! Each handler runs after the reducer has applied the intent, with a
//! snapshot of the resulting state. Requests run on spawned tasks and report
//! back by dispatching outcome intents. Navigation and notifications go out
//! as [`StoreEvent`]s.

use crate::api::{ApiClient, ApiError, AuthClient, AuthResponse, ProductsClient};
use crate::router::Route;
use crate::session::{is_token_live, CredentialStore};
use crate::store::auth::AuthIntent;
use crate::store::products::ProductsIntent;
use crate::store::{AppIntent, AppState, Claim, Notification, Store, StoreEvent};

const WELCOME: &str = "Welcome!";
const SESSION_CLOSED: &str = "Session closed";
const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

const PRODUCT_CREATED: &str = "Product created";
const PRODUCT_UPDATED: &str = "Product updated";
const PRODUCT_DELETED: &str = "Product deleted";

const LOAD_PRODUCTS_FAILED: &str = "Failed to load products";
const LOAD_PRODUCT_FAILED: &str = "Failed to load product";
const CREATE_PRODUCT_FAILED: &str = "Failed to create product";
const UPDATE_PRODUCT_FAILED: &str = "Failed to update product";
const DELETE_PRODUCT_FAILED: &str = "Failed to delete product";
const LOAD_CATEGORIES_FAILED: &str = "Failed to load categories";

#[derive(Clone)]
pub struct Effects {
    auth: AuthClient,
    products: ProductsClient,
    credentials: CredentialStore,
}

impl Effects {
    pub fn new(api: ApiClient, credentials: CredentialStore) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            products: ProductsClient::new(api, credentials.clone()),
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub(super) fn handle(
        &self,
        store: &Store,
        intent: AppIntent,
        state: &AppState,
        claim: Option<Claim>,
    ) {
        match intent {
            AppIntent::Auth(intent) => self.handle_auth(store, intent, claim),
            AppIntent::Products(intent) => self.handle_products(store, intent, state, claim),
        }
    }

    fn handle_auth(&self, store: &Store, intent: AuthIntent, claim: Option<Claim>) {
        match intent {
            AuthIntent::Login { credentials } => {
                let client = self.auth.clone();
                let session = self.credentials.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let _claim = claim;
                    let intent = match client.login(&credentials).await {
                        Ok(response) => {
                            persist(&session, &response);
                            AuthIntent::LoginSucceeded { response }
                        }
                        Err(e) => AuthIntent::LoginFailed {
                            error: failure(&e, LOGIN_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            AuthIntent::Register { user_data } => {
                let client = self.auth.clone();
                let session = self.credentials.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let _claim = claim;
                    let intent = match client.register(&user_data).await {
                        Ok(response) => {
                            persist(&session, &response);
                            AuthIntent::RegisterSucceeded { response }
                        }
                        Err(e) => AuthIntent::RegisterFailed {
                            error: failure(&e, REGISTRATION_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            AuthIntent::LoginSucceeded { response } | AuthIntent::RegisterSucceeded { response } => {
                tracing::info!(user = %response.user.email, "Signed in");
                store.emit(StoreEvent::Navigate(Route::products()));
                store.emit(StoreEvent::Notify(Notification::success(WELCOME)));
            }
            AuthIntent::LoginFailed { error } | AuthIntent::RegisterFailed { error } => {
                store.emit(StoreEvent::Notify(Notification::error(error)));
            }
            AuthIntent::Logout => {
                self.clear_session();
                tracing::info!("Signed out");
                store.emit(StoreEvent::Navigate(Route::Login));
                store.emit(StoreEvent::Notify(Notification::success(SESSION_CLOSED)));
            }
            AuthIntent::Initialize => {
                let restored = match (self.credentials.user(), self.credentials.token()) {
                    (Some(user), Some(token)) if is_token_live(token.expose()) => Some((user, token)),
                    _ => None,
                };
                match restored {
                    Some((user, token)) => {
                        tracing::info!(user = %user.email, "Restored session");
                        store.dispatch(AuthIntent::SetUser {
                            user,
                            token: token.expose().to_string(),
                        });
                    }
                    None => store.dispatch(AuthIntent::SessionInvalid),
                }
            }
            AuthIntent::SessionInvalid => {
                self.clear_session();
                store.emit(StoreEvent::Navigate(Route::Login));
            }
            AuthIntent::SetUser { .. } | AuthIntent::ClearError => {}
        }
    }

    fn handle_products(
        &self,
        store: &Store,
        intent: ProductsIntent,
        state: &AppState,
        claim: Option<Claim>,
    ) {
        let current = &state.products;
        match intent {
            ProductsIntent::LoadProducts { .. } => {
                let seq = current.list_seq;
                let filter = current.filter.clone();
                let client = self.products.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let intent = match client.list(&filter).await {
                        Ok(page) => ProductsIntent::ProductsLoaded {
                            seq,
                            products: page.products,
                            total: page.total,
                            total_pages: page.total_pages,
                        },
                        Err(e) => ProductsIntent::LoadProductsFailed {
                            seq,
                            error: failure(&e, LOAD_PRODUCTS_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            ProductsIntent::LoadProduct { id } => {
                let seq = current.detail_seq;
                let client = self.products.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let intent = match client.get(&id).await {
                        Ok(product) => ProductsIntent::ProductLoaded { seq, product },
                        Err(e) => ProductsIntent::LoadProductFailed {
                            seq,
                            error: failure(&e, LOAD_PRODUCT_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            ProductsIntent::CreateProduct { product } => {
                let client = self.products.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let _claim = claim;
                    let intent = match client.create(&product).await {
                        Ok(product) => ProductsIntent::ProductCreated { product },
                        Err(e) => ProductsIntent::CreateProductFailed {
                            error: failure(&e, CREATE_PRODUCT_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            ProductsIntent::UpdateProduct { id, patch } => {
                let client = self.products.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let _claim = claim;
                    let intent = match client.update(&id, &patch).await {
                        Ok(product) => ProductsIntent::ProductUpdated { product },
                        Err(e) => ProductsIntent::UpdateProductFailed {
                            error: failure(&e, UPDATE_PRODUCT_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            ProductsIntent::DeleteProduct { id } => {
                let client = self.products.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let _claim = claim;
                    let intent = match client.delete(&id).await {
                        Ok(_) => ProductsIntent::ProductDeleted { id },
                        Err(e) => ProductsIntent::DeleteProductFailed {
                            error: failure(&e, DELETE_PRODUCT_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }
            ProductsIntent::LoadCategories => {
                let client = self.products.clone();
                let handle = store.clone();
                store.spawn(async move {
                    let intent = match client.categories().await {
                        Ok(categories) => ProductsIntent::CategoriesLoaded { categories },
                        Err(e) => ProductsIntent::LoadCategoriesFailed {
                            error: failure(&e, LOAD_CATEGORIES_FAILED),
                        },
                    };
                    handle.dispatch(intent);
                });
            }

            ProductsIntent::ProductCreated { .. } => {
                store.emit(StoreEvent::Notify(Notification::success(PRODUCT_CREATED)));
                store.emit(StoreEvent::Navigate(Route::products()));
            }
            ProductsIntent::ProductUpdated { .. } => {
                store.emit(StoreEvent::Notify(Notification::success(PRODUCT_UPDATED)));
                store.emit(StoreEvent::Navigate(Route::products()));
            }
            ProductsIntent::ProductDeleted { .. } => {
                store.emit(StoreEvent::Notify(Notification::success(PRODUCT_DELETED)));
            }

            // A stale failure was already discarded by the reducer; stay quiet.
            ProductsIntent::LoadProductsFailed { seq, error } => {
                if seq == current.list_seq {
                    store.emit(StoreEvent::Notify(Notification::error(error)));
                }
            }
            ProductsIntent::LoadProductFailed { seq, error } => {
                if seq == current.detail_seq {
                    store.emit(StoreEvent::Notify(Notification::error(error)));
                }
            }
            ProductsIntent::CreateProductFailed { error }
            | ProductsIntent::UpdateProductFailed { error }
            | ProductsIntent::DeleteProductFailed { error }
            | ProductsIntent::LoadCategoriesFailed { error } => {
                store.emit(StoreEvent::Notify(Notification::error(error)));
            }

            ProductsIntent::SetFilter { .. } | ProductsIntent::ClearFilter => {
                store.dispatch(ProductsIntent::LoadProducts {
                    filter: current.filter.clone(),
                });
            }

            ProductsIntent::ProductsLoaded { .. }
            | ProductsIntent::ProductLoaded { .. }
            | ProductsIntent::CategoriesLoaded { .. }
            | ProductsIntent::SelectProduct { .. }
            | ProductsIntent::ClearError => {}
        }
    }

    fn clear_session(&self) {
        if let Err(e) = self.credentials.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }
}

fn persist(session: &CredentialStore, response: &AuthResponse) {
    if let Err(e) = session.persist(&response.access_token, &response.user) {
        tracing::warn!(error = %e, "Failed to persist session");
    }
}

fn failure(error: &ApiError, fallback: &str) -> String {
    tracing::debug!(error = %error, "Request failed");
    error.user_message(fallback)
}
