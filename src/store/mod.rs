//! The ordered store contract and derived operations.
//!
//! This module defines what every backend must provide:
//!
//! - [`OrderedStore`] - Required operations plus derived default methods
//! - [`StoreError`] - Backend-agnostic error type
//! - [`PrefixKeys`] / [`PrefixItems`] - Prefix-scan adapters over range
//!   iteration
//! - [`batches`] - Fixed-size chunk partitioning for bulk writes

mod batch;
mod error;
mod prefix;
mod traits;

pub use batch::{batches, Batches};
pub use error::{StoreError, StoreResult};
pub use prefix::{PrefixItems, PrefixKeys};
pub use traits::OrderedStore;
