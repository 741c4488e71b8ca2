//! Pipeline entry points for pricing operations.
//!
//! - `run_download`: Fetch raw catalog records into a JSON dump
//! - `run_build`: Normalize a dump into the SQLite snapshot
//! - `run_attributes` / `run_values`: Explore catalog attributes
//! - `run_validate` / `run_info`: Inspect configuration and snapshot

mod attributes;
pub mod build;
mod download;
mod info;
mod validate;

pub use attributes::{run_attributes, run_values};
pub use build::run_build;
pub use download::run_download;
pub use info::run_info;
pub use validate::run_validate;
