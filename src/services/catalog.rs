// src/services/catalog.rs

//! Pricing catalog client abstraction.
//!
//! The fetcher only needs three paged calls from the catalog. Keeping them
//! behind a trait lets the AWS client be swapped for a scripted one in tests.

use async_trait::async_trait;

use crate::error::Result;

/// Exact-match product filter (`TERM_MATCH` in the AWS API).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
    pub field: String,
    pub value: String,
}

impl TermFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// One `GetProducts` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub service_code: String,
    pub format_version: String,
    pub filters: Vec<TermFilter>,
    pub next_token: Option<String>,
}

/// One page of a paged response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

/// Paged access to a pricing catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of products; each item is one JSON-encoded record.
    async fn get_products(&self, query: &ProductQuery) -> Result<Page<String>>;

    /// Attribute names the service supports.
    async fn describe_attribute_names(
        &self,
        service_code: &str,
        format_version: &str,
    ) -> Result<Vec<String>>;

    /// Fetch one page of values for a single attribute.
    async fn get_attribute_values(
        &self,
        service_code: &str,
        attribute_name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<String>>;
}
