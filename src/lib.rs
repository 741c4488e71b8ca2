// src/lib.rs

//! EC2 Pricing Snapshot Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
