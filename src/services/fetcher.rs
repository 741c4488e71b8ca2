// src/services/fetcher.rs

//! Paged catalog fetcher.
//!
//! Follows continuation tokens until the catalog stops returning one and
//! concatenates the pages in arrival order. There is no retry: any failed
//! page aborts the whole fetch.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::CatalogConfig;
use crate::services::catalog::{CatalogClient, Page, ProductQuery, TermFilter};

/// Fetches complete result sets from a [`CatalogClient`].
pub struct PagedFetcher<'a> {
    client: &'a dyn CatalogClient,
    service_code: String,
    format_version: String,
}

impl<'a> PagedFetcher<'a> {
    pub fn new(
        client: &'a dyn CatalogClient,
        service_code: impl Into<String>,
        format_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            service_code: service_code.into(),
            format_version: format_version.into(),
        }
    }

    /// Create a fetcher for the configured service.
    pub fn from_config(client: &'a dyn CatalogClient, catalog: &CatalogConfig) -> Self {
        Self::new(client, &catalog.service_code, &catalog.format_version)
    }

    /// Fetch every product matching all `filters` exactly.
    ///
    /// Records are returned as decoded JSON in arrival order; they are not
    /// interpreted here.
    pub async fn fetch_all(&self, filters: &BTreeMap<String, String>) -> Result<Vec<Value>> {
        let filters: Vec<TermFilter> = filters
            .iter()
            .map(|(field, value)| TermFilter::new(field, value))
            .collect();

        let mut records = Vec::new();
        let mut next_token: Option<String> = None;
        let mut page_num = 0usize;

        loop {
            let query = ProductQuery {
                service_code: self.service_code.clone(),
                format_version: self.format_version.clone(),
                filters: filters.clone(),
                next_token: next_token.clone(),
            };
            let page = self.client.get_products(&query).await?;
            page_num += 1;

            for item in &page.items {
                let record: Value = serde_json::from_str(item).map_err(|e| {
                    AppError::upstream(format!("page {page_num} has an undecodable record: {e}"))
                })?;
                records.push(record);
            }

            log::info!(
                "Fetched page {}: {} records so far",
                page_num,
                records.len()
            );

            match continuation(next_token.as_deref(), page.next_token)? {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        Ok(records)
    }

    /// Fetch every value of a single product attribute.
    pub async fn fetch_attribute_values(&self, attribute_name: &str) -> Result<Vec<String>> {
        let mut values = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let Page { items, next_token: returned } = self
                .client
                .get_attribute_values(&self.service_code, attribute_name, next_token.as_deref())
                .await?;
            values.extend(items);

            log::debug!("{}: {} values so far", attribute_name, values.len());

            match continuation(next_token.as_deref(), returned)? {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        Ok(values)
    }

    /// Attribute names supported by the service.
    pub async fn fetch_attribute_names(&self) -> Result<Vec<String>> {
        self.client
            .describe_attribute_names(&self.service_code, &self.format_version)
            .await
    }
}

/// Decide whether to request another page.
///
/// An absent or empty token ends the loop. A token equal to the one just
/// sent would never terminate and is rejected.
fn continuation(sent: Option<&str>, returned: Option<String>) -> Result<Option<String>> {
    match returned {
        None => Ok(None),
        Some(token) if token.is_empty() => Ok(None),
        Some(token) if Some(token.as_str()) == sent => Err(AppError::upstream(format!(
            "catalog returned the same continuation token twice: {token}"
        ))),
        Some(token) => Ok(Some(token)),
    }
}
