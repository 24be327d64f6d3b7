use reqwest::Method;

use super::{ApiClient, ApiError, AuthResponse, LoginRequest, RegisterRequest};

/// Client for `/auth/*`. Auth calls never carry a bearer token.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.api.endpoint(&["auth", "login"])?;
        tracing::debug!(email = %credentials.email, "POST /auth/login");
        let builder = self.api.request(Method::POST, url).json(credentials);
        self.api.send_json(builder, "/auth/login").await
    }

    pub async fn register(&self, user_data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let url = self.api.endpoint(&["auth", "register"])?;
        tracing::debug!(email = %user_data.email, "POST /auth/register");
        let builder = self.api.request(Method::POST, url).json(user_data);
        self.api.send_json(builder, "/auth/register").await
    }
}
