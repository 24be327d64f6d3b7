//! Application state container.
//!
//! [`Store`] owns the [`AppState`], runs every intent through the slice
//! reducers and then hands it to [`Effects`], which talk to the backend and
//! feed outcome intents back through [`Store::dispatch`]. Navigation and
//! notifications leave the store as [`StoreEvent`]s.

pub mod auth;
mod effects;
mod events;
pub mod mvi;
pub mod products;

pub use effects::Effects;
pub use events::{Notification, NotificationLevel, StoreEvent, ERROR_DURATION, SUCCESS_DURATION};

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{mpsc, Notify};

use auth::{AuthIntent, AuthReducer, AuthState};
use mvi::{Intent, Reducer, UiState};
use products::{ProductState, ProductsIntent, ProductsReducer};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub products: ProductState,
}

impl UiState for AppState {}

#[derive(Debug, Clone)]
pub enum AppIntent {
    Auth(AuthIntent),
    Products(ProductsIntent),
}

impl Intent for AppIntent {}

impl From<AuthIntent> for AppIntent {
    fn from(intent: AuthIntent) -> Self {
        AppIntent::Auth(intent)
    }
}

impl From<ProductsIntent> for AppIntent {
    fn from(intent: ProductsIntent) -> Self {
        AppIntent::Products(intent)
    }
}

/// Routes each intent to the slice it belongs to.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = AppIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AppIntent::Auth(intent) => AppState {
                auth: AuthReducer::reduce(state.auth, intent),
                ..state
            },
            AppIntent::Products(intent) => AppState {
                products: ProductsReducer::reduce(state.products, intent),
                ..state
            },
        }
    }
}

/// Request kinds that ignore new triggers while one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Exclusive {
    Login,
    Register,
    Create,
    Update,
    Delete,
}

impl Exclusive {
    fn of(intent: &AppIntent) -> Option<Exclusive> {
        match intent {
            AppIntent::Auth(AuthIntent::Login { .. }) => Some(Exclusive::Login),
            AppIntent::Auth(AuthIntent::Register { .. }) => Some(Exclusive::Register),
            AppIntent::Products(ProductsIntent::CreateProduct { .. }) => Some(Exclusive::Create),
            AppIntent::Products(ProductsIntent::UpdateProduct { .. }) => Some(Exclusive::Update),
            AppIntent::Products(ProductsIntent::DeleteProduct { .. }) => Some(Exclusive::Delete),
            _ => None,
        }
    }
}

/// Held by an exclusive request's task; releases the kind on drop.
pub(crate) struct Claim {
    inner: Arc<Inner>,
    kind: Exclusive,
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.inner.in_flight.lock().remove(&self.kind);
    }
}

/// Decrements the pending count when a spawned effect finishes, even if it
/// panicked.
struct PendingGuard {
    inner: Arc<Inner>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.inner.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

struct Inner {
    state: RwLock<AppState>,
    effects: Option<Effects>,
    events: mpsc::UnboundedSender<StoreEvent>,
    pending: AtomicUsize,
    idle: Notify,
    in_flight: Mutex<HashSet<Exclusive>>,
}

/// Shared handle to the state container. Clones refer to the same store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    pub fn new(effects: Effects) -> (Store, mpsc::UnboundedReceiver<StoreEvent>) {
        Self::build(Some(effects))
    }

    /// A store that only reduces. Nothing is fetched or persisted.
    pub fn without_effects() -> (Store, mpsc::UnboundedReceiver<StoreEvent>) {
        Self::build(None)
    }

    fn build(effects: Option<Effects>) -> (Store, mpsc::UnboundedReceiver<StoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Store {
            inner: Arc::new(Inner {
                state: RwLock::new(AppState::default()),
                effects,
                events: tx,
                pending: AtomicUsize::new(0),
                idle: Notify::new(),
                in_flight: Mutex::new(HashSet::new()),
            }),
        };
        (store, rx)
    }

    /// Reduce `intent` into the state, then run its effect.
    ///
    /// Reductions are serialised, so intents apply in dispatch order. A
    /// login, register, create, update or delete dispatched while another of
    /// the same kind is still in flight is dropped without reaching the
    /// reducer.
    pub fn dispatch(&self, intent: impl Into<AppIntent>) {
        let intent = intent.into();

        let claim = match (&self.inner.effects, Exclusive::of(&intent)) {
            (Some(_), Some(kind)) => match self.claim(kind) {
                Some(claim) => Some(claim),
                None => {
                    tracing::warn!(?kind, "Request already in flight, ignoring");
                    return;
                }
            },
            _ => None,
        };

        let snapshot = {
            let mut state = self.inner.state.write();
            let current = std::mem::take(&mut *state);
            *state = AppReducer::reduce(current, intent.clone());
            state.clone()
        };

        if let Some(effects) = &self.inner.effects {
            effects.handle(self, intent, &snapshot, claim);
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.read().clone()
    }

    /// Project the current state without cloning all of it.
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.inner.state.read())
    }

    /// Resolves once no effect task is running.
    pub async fn settled(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.inner.pending.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        if let StoreEvent::Navigate(route) = &event {
            tracing::info!(route = %route, "Navigate");
        }
        // The view may have gone away; events are best-effort.
        let _ = self.inner.events.send(event);
    }

    /// Run an effect in the background, tracked by [`Store::settled`].
    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        let guard = PendingGuard {
            inner: Arc::clone(&self.inner),
        };
        tokio::spawn(async move {
            let _guard = guard;
            task.await;
        });
    }

    fn claim(&self, kind: Exclusive) -> Option<Claim> {
        if !self.inner.in_flight.lock().insert(kind) {
            return None;
        }
        Some(Claim {
            inner: Arc::clone(&self.inner),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Product, ProductFilter};

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: None,
            price: 1.0,
            category: "General".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn routes_intents_to_their_slice() {
        let state = AppReducer::reduce(
            AppState::default(),
            AuthIntent::LoginFailed {
                error: "nope".to_string(),
            }
            .into(),
        );
        assert_eq!(state.auth.error.as_deref(), Some("nope"));
        assert_eq!(state.products, ProductState::default());
    }

    #[tokio::test]
    async fn reducer_only_store_applies_in_order() {
        let (store, _events) = Store::without_effects();
        store.dispatch(ProductsIntent::LoadProducts {
            filter: ProductFilter::default(),
        });
        store.dispatch(ProductsIntent::ProductsLoaded {
            seq: 1,
            products: vec![product("a"), product("b")],
            total: 2,
            total_pages: 1,
        });
        store.dispatch(ProductsIntent::ProductDeleted { id: "a".to_string() });

        let ids: Vec<String> = store.select(|s| s.products.products.iter().map(|p| p.id.clone()).collect());
        assert_eq!(ids, vec!["b".to_string()]);
        assert_eq!(store.state().products.total, 1);
        store.settled().await;
    }

    #[tokio::test]
    async fn settled_waits_for_spawned_work() {
        let (store, _events) = Store::without_effects();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        store.spawn(async move {
            let _ = rx.await;
        });

        let waiter = {
            let store = store.clone();
            tokio::spawn(async move { store.settled().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        tx.send(()).unwrap();
        waiter.await.unwrap();
    }

    #[test]
    fn claims_are_exclusive_until_dropped() {
        let (store, _events) = Store::without_effects();
        let first = store.claim(Exclusive::Create);
        assert!(first.is_some());
        assert!(store.claim(Exclusive::Create).is_none());
        assert!(store.claim(Exclusive::Delete).is_some());
        drop(first);
        assert!(store.claim(Exclusive::Create).is_some());
    }
}
