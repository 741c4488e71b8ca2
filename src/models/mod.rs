// src/models/mod.rs

//! Domain models for the pricing pipeline.
//!
//! - `RawProduct`: catalog record as downloaded
//! - `PriceRow`: flattened row stored in the snapshot
//! - `Config`: TOML configuration

mod config;
mod price_row;
mod product;

// Re-export all public types
pub use config::{CatalogConfig, Config, PathsConfig};
pub use price_row::{Architecture, PriceRow};
pub use product::{PriceDimension, Product, RawProduct, Term, Terms};
