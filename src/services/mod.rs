//! Service layer for the pricing pipeline.
//!
//! This module contains the business logic for:
//! - Catalog access (`CatalogClient`, `AwsPricingClient`)
//! - Paged fetching (`PagedFetcher`)
//! - Record normalization (`normalize`)

#[cfg(feature = "aws")]
mod aws;
pub mod catalog;
mod fetcher;
pub mod normalizer;

#[cfg(feature = "aws")]
pub use aws::AwsPricingClient;
pub use catalog::{CatalogClient, Page, ProductQuery, TermFilter};
pub use fetcher::PagedFetcher;
pub use normalizer::normalize;
