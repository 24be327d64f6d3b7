//! Thin REST clients for the catalog backend.
//!
//! [`ApiClient`] owns the shared `reqwest::Client` and base URL; the
//! [`AuthClient`] and [`ProductsClient`] wrappers map one method to one
//! endpoint and return decoded JSON.

mod auth;
mod error;
mod models;
mod products;

pub use auth::AuthClient;
pub use error::{extract_message, ApiError};
pub use models::{
    AuthResponse, DeleteResponse, LoginRequest, NewProduct, Product, ProductFilter, ProductPage,
    ProductPatch, RegisterRequest, User, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
pub use products::ProductsClient;

use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::Url {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_seconds));
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|source| ApiError::Transport {
            endpoint: config.base_url.clone(),
            source,
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url {
                url: self.base_url.to_string(),
                reason: "base URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request and decode a JSON body, mapping non-2xx to
    /// [`ApiError::Status`] with the server's message.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        tracing::debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API response"
        );

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}
