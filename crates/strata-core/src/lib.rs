//! # strata-core
//!
//! Core types for the strata jj integration layer.
//!
//! strata lets a host application query and mutate a jj repository by
//! shelling out to the `jj` CLI and decoding what it prints. This crate
//! holds the pieces every other crate agrees on:
//!
//! - The unified error type ([`StrataError`])
//! - Decoded value objects (commits, bookmarks, diff entries)
//! - Repository-level configuration ([`StrataConfig`])

mod config;
mod error;
mod types;

pub use config::StrataConfig;
pub use error::{Result, StrataError};
pub use types::*;
