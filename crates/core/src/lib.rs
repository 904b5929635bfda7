//! Core types and shared functionality for pagetalk.
//!
//! This crate provides:
//! - Cache abstractions (key derivation, key-value store trait, scrape cache)
//! - The `ScrapedContent` data model
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod content;
pub mod error;

pub use cache::{KvStore, MemoryStore, ScrapeCache};
pub use config::AppConfig;
pub use content::{Headings, ScrapedContent};
pub use error::Error;
