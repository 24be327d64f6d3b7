//! Wire models for the catalog backend.
//!
//! The backend speaks Spanish field names (`nombre`, `precio`, ...); the
//! serde renames keep the Rust side in English.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Response body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(
        rename = "descripcion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(
        rename = "descripcion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// Body of `PATCH /products/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductPatch {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "descripcion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

/// One page of `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(rename = "productos")]
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: String,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters of the product list query.
///
/// `category` and `search` are `None` rather than empty; use
/// [`ProductFilter::normalized`] after building one from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            category: None,
            search: None,
        }
    }
}

impl ProductFilter {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: if limit == 0 { DEFAULT_PAGE_SIZE } else { limit },
            ..Self::default()
        }
    }

    /// Collapse blank category/search to `None` and clamp page/limit to 1+.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: if self.limit == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                self.limit
            },
            category: non_blank(self.category),
            search: non_blank(self.search),
        }
    }

    pub fn has_active_filters(&self) -> bool {
        self.category.as_deref().is_some_and(|c| !c.is_empty())
            || self.search.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Query pairs in backend order: `page`, `limit`, then the optional
    /// `categoria` and `search` when non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("categoria", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
