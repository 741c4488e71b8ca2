//! AWS Price List Query API client.
//!
//! Thin adapter from the SDK's request builders to [`CatalogClient`].
//! Errors are flattened into [`AppError::Upstream`] with the full SDK
//! error context so the operator sees the service's reason.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_pricing::Client;
use aws_sdk_pricing::error::DisplayErrorContext;
use aws_sdk_pricing::types::{Filter, FilterType};

use crate::error::{AppError, Result};
use crate::models::CatalogConfig;
use crate::services::catalog::{CatalogClient, Page, ProductQuery};

/// Pricing catalog backed by the AWS SDK.
#[derive(Clone)]
pub struct AwsPricingClient {
    client: Client,
}

impl AwsPricingClient {
    /// Wrap an existing SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the environment's credential chain.
    ///
    /// The pricing API is only served from a few regions, so the region
    /// comes from configuration rather than the ambient profile.
    pub async fn from_config(catalog: &CatalogConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(catalog.region.clone()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl CatalogClient for AwsPricingClient {
    async fn get_products(&self, query: &ProductQuery) -> Result<Page<String>> {
        let filters = query
            .filters
            .iter()
            .map(|f| {
                Filter::builder()
                    .r#type(FilterType::TermMatch)
                    .field(&f.field)
                    .value(&f.value)
                    .build()
                    .map_err(|e| AppError::upstream(format!("invalid filter {}: {e}", f.field)))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .get_products()
            .service_code(&query.service_code)
            .format_version(&query.format_version)
            .set_filters(Some(filters))
            .set_next_token(query.next_token.clone())
            .send()
            .await
            .map_err(|e| AppError::upstream(DisplayErrorContext(&e)))?;

        Ok(Page {
            items: output.price_list().to_vec(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn describe_attribute_names(
        &self,
        service_code: &str,
        format_version: &str,
    ) -> Result<Vec<String>> {
        let output = self
            .client
            .describe_services()
            .service_code(service_code)
            .format_version(format_version)
            .send()
            .await
            .map_err(|e| AppError::upstream(DisplayErrorContext(&e)))?;

        let service = output
            .services()
            .first()
            .ok_or_else(|| AppError::upstream(format!("unknown service code {service_code}")))?;
        Ok(service.attribute_names().to_vec())
    }

    async fn get_attribute_values(
        &self,
        service_code: &str,
        attribute_name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<String>> {
        let output = self
            .client
            .get_attribute_values()
            .service_code(service_code)
            .attribute_name(attribute_name)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| AppError::upstream(DisplayErrorContext(&e)))?;

        Ok(Page {
            items: output
                .attribute_values()
                .iter()
                .filter_map(|v| v.value().map(str::to_string))
                .collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }
}
