// src/pipeline/download.rs

//! Catalog download pipeline.

use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::models::Config;
use crate::services::{CatalogClient, PagedFetcher};
use crate::storage::write_dump;

/// Fetch every product matching the configured filters and write the raw
/// records to `path` as a JSON array.
///
/// Nothing is written unless the whole fetch succeeds. Returns the number
/// of records saved.
pub async fn run_download(
    config: &Config,
    client: &dyn CatalogClient,
    path: &Path,
) -> Result<usize> {
    let start_time = Utc::now();
    log::info!(
        "Downloading {} prices with {} filters",
        config.catalog.service_code,
        config.filters.len()
    );

    let fetcher = PagedFetcher::from_config(client, &config.catalog);
    let records = fetcher.fetch_all(&config.filters).await?;
    log::info!("In total {} prices have been downloaded", records.len());

    write_dump(path, &records).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Successfully saved downloaded prices to {} ({}s)",
        path.display(),
        elapsed.num_seconds()
    );

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::catalog::mock::ScriptedCatalog;
    use crate::storage::read_dump;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_writes_all_pages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.json");
        let catalog = ScriptedCatalog::new()
            .with_products(vec![json!({"sku": "A"})], Some("next"))
            .with_products(vec![json!({"sku": "B"})], None);

        let count = run_download(&Config::default(), &catalog, &path).await.unwrap();

        assert_eq!(count, 2);
        let dump = read_dump(&path).await.unwrap();
        assert_eq!(dump, vec![json!({"sku": "A"}), json!({"sku": "B"})]);
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.json");
        let catalog = ScriptedCatalog::new()
            .with_products(vec![json!({"sku": "A"})], Some("next"))
            .with_product_page(Err(AppError::upstream("connection reset")));

        let err = run_download(&Config::default(), &catalog, &path).await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert!(!path.exists());
    }
}
