use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Url};

use super::{
    ApiClient, ApiError, DeleteResponse, NewProduct, Product, ProductFilter, ProductPage,
    ProductPatch,
};
use crate::session::CredentialStore;

/// Client for `/products/*`.
///
/// Every request is decorated with `Authorization: Bearer <token>` when the
/// credential store holds a token.
#[derive(Clone)]
pub struct ProductsClient {
    api: ApiClient,
    credentials: CredentialStore,
}

impl ProductsClient {
    pub fn new(api: ApiClient, credentials: CredentialStore) -> Self {
        Self { api, credentials }
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.api.request(method, url);
        match self.credentials.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token.expose())),
            None => builder,
        }
    }

    pub async fn list(&self, filter: &ProductFilter) -> Result<ProductPage, ApiError> {
        let mut url = self.api.endpoint(&["products"])?;
        url.query_pairs_mut().extend_pairs(filter.query_pairs());
        tracing::debug!(query = url.query().unwrap_or(""), "GET /products");
        let builder = self.authorized(Method::GET, url);
        self.api.send_json(builder, "/products").await
    }

    pub async fn get(&self, id: &str) -> Result<Product, ApiError> {
        let url = self.api.endpoint(&["products", id])?;
        let builder = self.authorized(Method::GET, url);
        self.api.send_json(builder, "/products/:id").await
    }

    pub async fn create(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let url = self.api.endpoint(&["products"])?;
        let builder = self.authorized(Method::POST, url).json(product);
        self.api.send_json(builder, "/products").await
    }

    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, ApiError> {
        let url = self.api.endpoint(&["products", id])?;
        let builder = self.authorized(Method::PATCH, url).json(patch);
        self.api.send_json(builder, "/products/:id").await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteResponse, ApiError> {
        let url = self.api.endpoint(&["products", id])?;
        let builder = self.authorized(Method::DELETE, url);
        self.api.send_json(builder, "/products/:id").await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.api.endpoint(&["products", "categories"])?;
        let builder = self.authorized(Method::GET, url);
        self.api.send_json(builder, "/products/categories").await
    }
}
