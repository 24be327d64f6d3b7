//! Route table and guard.
//!
//! | Path                    | Route            | Auth |
//! |-------------------------|------------------|------|
//! | `/auth/login`           | `Login`          | no   |
//! | `/auth/register`        | `Register`       | no   |
//! | `/products?page&limit&categoria&search` | `ProductList` | yes |
//! | `/products/new`         | `NewProduct`     | yes  |
//! | `/products/:id`         | `ProductDetail`  | yes  |
//! | `/products/:id/edit`    | `EditProduct`    | yes  |
//!
//! Anything else resolves to the unfiltered product list.

use reqwest::Url;

use crate::api::{ProductFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Dummy origin used only to reuse `Url`'s path and query parsing.
const ROUTE_ORIGIN: &str = "http://catalog.local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ProductList(ProductFilter),
    NewProduct,
    ProductDetail(String),
    EditProduct(String),
}

impl Route {
    /// Parse a path with optional query string. Never fails: unknown
    /// targets fall back to the product list.
    pub fn parse(target: &str) -> Route {
        let target = target.trim();
        let target = if target.starts_with('/') {
            target.to_string()
        } else {
            format!("/{target}")
        };

        let Ok(url) = Url::parse(&format!("{ROUTE_ORIGIN}{target}")) else {
            return Route::ProductList(ProductFilter::default());
        };

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(percent_decode)
                    .collect()
            })
            .unwrap_or_default();

        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        match segments.as_slice() {
            ["auth"] | ["auth", "login"] => Route::Login,
            ["auth", "register"] => Route::Register,
            ["products", "new"] => Route::NewProduct,
            ["products", id] => Route::ProductDetail((*id).to_string()),
            ["products", id, "edit"] => Route::EditProduct((*id).to_string()),
            ["products"] => Route::ProductList(ProductFilter::from_query(url.query().unwrap_or(""))),
            _ => Route::ProductList(ProductFilter::default()),
        }
    }

    /// Canonical path, including the query for list routes.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::ProductList(filter) => {
                let query = filter.to_query();
                if query.is_empty() {
                    "/products".to_string()
                } else {
                    format!("/products?{query}")
                }
            }
            Route::NewProduct => "/products/new".to_string(),
            Route::ProductDetail(id) => format!("/products/{}", encode_segment(id)),
            Route::EditProduct(id) => format!("/products/{}/edit", encode_segment(id)),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn products() -> Route {
        Route::ProductList(ProductFilter::default())
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Parse `target` and apply the auth guard.
pub fn resolve(target: &str, authenticated: bool) -> Route {
    let route = Route::parse(target);
    if route.requires_auth() && !authenticated {
        tracing::info!(target = %target, "Unauthenticated access redirected to login");
        return Route::Login;
    }
    route
}

impl ProductFilter {
    /// Build a filter from list-route query parameters.
    ///
    /// `page`/`limit` that are missing, unparsable or zero fall back to
    /// 1 and 10; blank `categoria`/`search` mean "no filter".
    pub fn from_query(query: &str) -> ProductFilter {
        let mut filter = ProductFilter::default();
        let url = match Url::parse(&format!("{ROUTE_ORIGIN}/?{query}")) {
            Ok(url) => url,
            Err(_) => return filter,
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => filter.page = parse_positive(&value).unwrap_or(DEFAULT_PAGE),
                "limit" => filter.limit = parse_positive(&value).unwrap_or(DEFAULT_PAGE_SIZE),
                "categoria" => filter.category = Some(value.into_owned()),
                "search" => filter.search = Some(value.into_owned()),
                _ => {}
            }
        }

        filter.normalized()
    }

    /// Query string for the list route. Defaults are omitted so the plain
    /// list is `/products`.
    pub fn to_query(&self) -> String {
        let mut url = match Url::parse(ROUTE_ORIGIN) {
            Ok(url) => url,
            Err(_) => return String::new(),
        };
        {
            let mut pairs = url.query_pairs_mut();
            if self.page != DEFAULT_PAGE {
                pairs.append_pair("page", &self.page.to_string());
            }
            if self.limit != DEFAULT_PAGE_SIZE {
                pairs.append_pair("limit", &self.limit.to_string());
            }
            if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
                pairs.append_pair("categoria", category);
            }
            if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("search", search);
            }
        }
        url.query().unwrap_or("").to_string()
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

/// Segments that are not valid UTF-8 once decoded are kept as typed.
fn percent_decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_routes() {
        assert_eq!(Route::parse("/auth/login"), Route::Login);
        assert_eq!(Route::parse("/auth"), Route::Login);
        assert_eq!(Route::parse("/auth/register"), Route::Register);
        assert_eq!(Route::parse("/products/new"), Route::NewProduct);
        assert_eq!(Route::parse("/"), Route::products());
    }

    #[test]
    fn parses_product_routes() {
        assert_eq!(
            Route::parse("/products/abc123"),
            Route::ProductDetail("abc123".to_string())
        );
        assert_eq!(
            Route::parse("/products/abc123/edit"),
            Route::EditProduct("abc123".to_string())
        );
    }

    #[test]
    fn unknown_paths_go_to_products() {
        assert_eq!(Route::parse("/nowhere/at/all"), Route::products());
        assert_eq!(Route::parse("/products/a/b/c"), Route::products());
    }

    #[test]
    fn list_route_reads_query() {
        let route = Route::parse("/products?page=2&limit=5&categoria=Electr%C3%B3nicos&search=tv");
        assert_eq!(
            route,
            Route::ProductList(ProductFilter {
                page: 2,
                limit: 5,
                category: Some("Electrónicos".to_string()),
                search: Some("tv".to_string()),
            })
        );
    }

    #[test]
    fn bad_page_and_limit_fall_back() {
        let filter = ProductFilter::from_query("page=abc&limit=0&categoria=");
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn path_round_trips_through_parse() {
        let route = Route::ProductList(ProductFilter {
            page: 3,
            limit: 10,
            category: Some("Hogar & Jardín".to_string()),
            search: None,
        });
        assert_eq!(Route::parse(&route.path()), route);
        assert_eq!(Route::products().path(), "/products");

        let detail = Route::ProductDetail("id with space".to_string());
        assert_eq!(Route::parse(&detail.path()), detail);
    }

    #[test]
    fn ids_are_escaped_as_single_segments() {
        let detail = Route::ProductDetail("a/b+c".to_string());
        assert_eq!(detail.path(), "/products/a%2Fb%2Bc");
        assert_eq!(Route::parse(&detail.path()), detail);

        let edit = Route::EditProduct("café".to_string());
        assert_eq!(edit.path(), "/products/caf%C3%A9/edit");
        assert_eq!(Route::parse("/products/caf%C3%A9/edit"), edit);
        assert_eq!(
            Route::parse("/products/a+b"),
            Route::ProductDetail("a+b".to_string())
        );
    }

    #[test]
    fn guard_redirects_protected_routes() {
        assert_eq!(resolve("/products/new", false), Route::Login);
        assert_eq!(resolve("/products", false), Route::Login);
        assert_eq!(resolve("/auth/register", false), Route::Register);
        assert_eq!(resolve("/products/new", true), Route::NewProduct);
    }
}
