// src/pipeline/attributes.rs

//! Catalog attribute discovery.
//!
//! Useful when choosing filters: lists the attribute names a service
//! supports and every value one attribute takes.

use crate::error::Result;
use crate::models::Config;
use crate::services::{CatalogClient, PagedFetcher};

/// List attribute names supported by the configured service.
pub async fn run_attributes(config: &Config, client: &dyn CatalogClient) -> Result<Vec<String>> {
    let fetcher = PagedFetcher::from_config(client, &config.catalog);
    let mut names = fetcher.fetch_attribute_names().await?;
    names.sort();

    log::info!(
        "{} exposes {} attributes",
        config.catalog.service_code,
        names.len()
    );
    Ok(names)
}

/// List every value of `attribute` for the configured service.
pub async fn run_values(
    config: &Config,
    client: &dyn CatalogClient,
    attribute: &str,
) -> Result<Vec<String>> {
    let fetcher = PagedFetcher::from_config(client, &config.catalog);
    let values = fetcher.fetch_attribute_values(attribute).await?;

    log::info!("Attribute {} has {} values", attribute, values.len());
    Ok(values)
}
