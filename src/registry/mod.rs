/*!
 * Registry client implementations.
 *
 * This module contains the job-based client for the corporate registry's
 * extract service and the fetcher trait the resolver works against:
 * - `client`: HTTP client running the four-step extract protocol
 * - `mock`: scripted fetcher used by tests
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::errors::RegistryError;

/// Common trait for disclosure-document sources
///
/// This trait is the seam between the resolver and the registry: the real
/// client runs the asynchronous job protocol against the registry's HTTP
/// interface, while tests substitute a scripted fetcher.
#[async_trait]
pub trait DocumentFetcher: Send + Sync + Debug {
    /// Fetch the disclosure document for a query
    ///
    /// # Arguments
    /// * `query` - A tax identifier or a free-text entity name
    ///
    /// # Returns
    /// * `Result<Bytes, RegistryError>` - The raw document bytes or an error
    async fn fetch_document(&self, query: &str) -> Result<Bytes, RegistryError>;
}

pub mod client;
pub mod mock;

pub use client::RegistryClient;
