use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::router::{resolve, Route};
use crate::session::{CredentialStore, FileStorage};
use crate::store::auth::{selectors as auth, AuthIntent};
use crate::store::{Effects, Notification, Store, StoreEvent};
use crate::views;

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub storage_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

/// Everything the store reported while a command ran.
#[derive(Debug, Default)]
pub struct Outcome {
    pub notifications: Vec<Notification>,
    /// Last navigation, if any.
    pub route: Option<Route>,
}

impl Outcome {
    pub fn error(&self) -> Option<&Notification> {
        self.notifications.iter().rev().find(|n| n.is_error())
    }

    /// Print successes to stdout and fail with the last error, if any.
    pub fn report(self) -> Result<()> {
        for notification in self.notifications.iter().filter(|n| !n.is_error()) {
            println!("{}", views::notification(notification));
        }
        match self.error() {
            Some(error) => Err(anyhow!(error.message.clone())),
            None => Ok(()),
        }
    }
}

/// A configured store plus its event stream.
pub struct Session {
    store: Store,
    events: mpsc::UnboundedReceiver<StoreEvent>,
    config: Config,
}

impl Session {
    /// Load config, build the store and restore any stored login.
    pub async fn open(options: &SessionOptions) -> Result<Self> {
        let config = match &options.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .context("load config")?
        .with_env_overrides()
        .context("apply environment overrides")?;
        let mut config = match &options.api_url {
            Some(url) => config.with_base_url(url).context("apply --api-url")?,
            None => config,
        };
        if let Some(dir) = &options.storage_dir {
            config.session.storage_dir = Some(dir.clone());
        }

        let credentials = if options.ephemeral {
            CredentialStore::in_memory()
        } else {
            let storage = FileStorage::new(config.session.resolved_storage_dir());
            tracing::debug!(dir = %storage.dir().display(), "Using session storage");
            CredentialStore::new(Arc::new(storage))
        };

        let api = ApiClient::new(&config.api).context("create HTTP client")?;
        let (store, events) = Store::new(Effects::new(api, credentials));

        let mut session = Session {
            store,
            events,
            config,
        };
        session.store.dispatch(AuthIntent::Initialize);
        // Startup redirects are not the command's outcome.
        session.settle().await;
        Ok(session)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.select(auth::is_authenticated)
    }

    /// Apply the route guard; a redirect to login becomes an error.
    pub fn guard(&self, target: &str) -> Result<Route> {
        match resolve(target, self.is_authenticated()) {
            Route::Login if Route::parse(target).requires_auth() => {
                bail!("Not signed in. Run `catalog login` first.")
            }
            route => Ok(route),
        }
    }

    /// Collect events emitted so far.
    pub fn drain(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        while let Ok(event) = self.events.try_recv() {
            match event {
                StoreEvent::Navigate(route) => outcome.route = Some(route),
                StoreEvent::Notify(notification) => outcome.notifications.push(notification),
            }
        }
        outcome
    }

    /// Wait for in-flight effects, then collect their events.
    pub async fn settle(&mut self) -> Outcome {
        self.store.settled().await;
        self.drain()
    }
}
