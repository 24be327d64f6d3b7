//! Input validation for the login, register and product forms.
//!
//! A form is plain data; `validate()` returns every failing field at once
//! and the `to_*` conversions refuse to build a payload from invalid input,
//! so nothing invalid is ever dispatched.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::api::{LoginRequest, NewProduct, Product, ProductPatch, RegisterRequest};

/// Category select value that switches the form to a free-text category.
pub const NEW_CATEGORY_SENTINEL: &str = "nueva-categoria";

pub const PASSWORD_MIN: usize = 6;
pub const USER_NAME_MIN: usize = 2;
pub const PRODUCT_NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const PRICE_MIN: f64 = 0.01;

const EMAIL_MAX: usize = 254;
const EMAIL_LOCAL_MAX: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("is required")]
    Required,
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("must be at least {0} characters")]
    MinLength(usize),
    #[error("must be at most {0} characters")]
    MaxLength(usize),
    #[error("must be a number")]
    NotANumber,
    #[error("must be at least 0.01")]
    MinValue,
    #[error("does not match")]
    Mismatch,
}

/// Failing fields keyed by field name, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("Invalid input: {}", summary(.fields))]
pub struct FormErrors {
    fields: BTreeMap<&'static str, FieldError>,
}

fn summary(fields: &BTreeMap<&'static str, FieldError>) -> String {
    fields
        .iter()
        .map(|(field, error)| format!("{field} {error}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.fields.iter().map(|(field, error)| (*field, error))
    }

    /// Record the first error per field only.
    fn add(&mut self, field: &'static str, error: Option<FieldError>) {
        if let Some(error) = error {
            self.fields.entry(field).or_insert(error);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Lengths are checked separately; the regex crate has no lookahead.
        let pattern = r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn required(value: &str) -> Option<FieldError> {
    value.trim().is_empty().then_some(FieldError::Required)
}

fn min_length(value: &str, min: usize) -> Option<FieldError> {
    (value.chars().count() < min).then_some(FieldError::MinLength(min))
}

fn max_length(value: &str, max: usize) -> Option<FieldError> {
    (value.chars().count() > max).then_some(FieldError::MaxLength(max))
}

fn email(value: &str) -> Option<FieldError> {
    if let Some(error) = required(value) {
        return Some(error);
    }
    let local_len = value.split('@').next().map_or(0, str::len);
    let valid = value.len() <= EMAIL_MAX
        && local_len <= EMAIL_LOCAL_MAX
        && email_regex().is_match(value);
    (!valid).then_some(FieldError::InvalidEmail)
}

fn password(value: &str) -> Option<FieldError> {
    required(value).or_else(|| min_length(value, PASSWORD_MIN))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.add("email", email(&self.email));
        errors.add("password", password(&self.password));
        errors.into_result()
    }

    pub fn to_request(&self) -> Result<LoginRequest, FormErrors> {
        self.validate()?;
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.add(
            "name",
            required(&self.name).or_else(|| min_length(&self.name, USER_NAME_MIN)),
        );
        errors.add("email", email(&self.email));
        errors.add("password", password(&self.password));
        errors.add(
            "confirm_password",
            required(&self.confirm_password)
                .or_else(|| (self.confirm_password != self.password).then_some(FieldError::Mismatch)),
        );
        errors.into_result()
    }

    /// The confirmation never leaves the form.
    pub fn to_request(&self) -> Result<RegisterRequest, FormErrors> {
        self.validate()?;
        Ok(RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
        })
    }
}

/// Create/edit form. `price` is kept as typed so that blank and
/// non-numeric input can be reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub new_category: String,
}

impl ProductForm {
    /// Pre-populated form for editing `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            category: product.category.clone(),
            new_category: String::new(),
        }
    }

    /// Change the category select. Leaving the sentinel discards any
    /// typed-in category.
    pub fn select_category(&mut self, value: impl Into<String>) {
        self.category = value.into();
        if !self.is_new_category() {
            self.new_category.clear();
        }
    }

    pub fn is_new_category(&self) -> bool {
        self.category == NEW_CATEGORY_SENTINEL
    }

    /// Category that will be sent: the typed-in one when the sentinel is selected.
    pub fn final_category(&self) -> &str {
        if self.is_new_category() {
            &self.new_category
        } else {
            &self.category
        }
    }

    fn parsed_price(&self) -> Result<f64, FieldError> {
        let raw = self.price.trim();
        if raw.is_empty() {
            return Err(FieldError::Required);
        }
        let price: f64 = raw.parse().map_err(|_| FieldError::NotANumber)?;
        if !price.is_finite() {
            return Err(FieldError::NotANumber);
        }
        if price < PRICE_MIN {
            return Err(FieldError::MinValue);
        }
        Ok(price)
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.add(
            "name",
            required(&self.name).or_else(|| max_length(&self.name, PRODUCT_NAME_MAX)),
        );
        errors.add("description", max_length(&self.description, DESCRIPTION_MAX));
        errors.add("price", self.parsed_price().err());
        errors.add("category", required(&self.category));
        if self.is_new_category() {
            errors.add("new_category", required(&self.new_category));
        }
        errors.into_result()
    }

    pub fn to_new_product(&self) -> Result<NewProduct, FormErrors> {
        self.validate()?;
        let price = self.parsed_price().map_err(|e| {
            let mut errors = FormErrors::default();
            errors.add("price", Some(e));
            errors
        })?;
        Ok(NewProduct {
            name: self.name.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            price,
            category: self.final_category().to_string(),
        })
    }

    /// Edits send every field; an empty description is omitted.
    pub fn to_patch(&self) -> Result<ProductPatch, FormErrors> {
        let product = self.to_new_product()?;
        Ok(ProductPatch {
            name: Some(product.name),
            description: product.description,
            price: Some(product.price),
            category: Some(product.category),
        })
    }
}

impl fmt::Display for ProductForm {
    /// Preview line shown before submitting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ${}", self.name, self.final_category(), self.price.trim())
    }
}
