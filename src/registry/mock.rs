/*!
 * Mock registry fetcher for testing.
 *
 * Serves scripted plain-text documents keyed by query and counts how many
 * times each query is fetched, which is what the resolver tests need to
 * assert cycle and revisit guarantees:
 * - `MockRegistry::new()` - empty registry, every query fails
 * - `document(query, text)` - script a document for a query
 * - `failing(query)` - make a specific query fail with a protocol error
 */

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::RegistryError;
use crate::registry::DocumentFetcher;

/// Scripted response for one query
#[derive(Debug)]
enum MockResponse {
    /// Serve these bytes
    Document(Bytes),
    /// Fail the fetch with a protocol error
    Fail,
}

/// Scripted document fetcher for resolver tests
#[derive(Debug, Default)]
pub struct MockRegistry {
    /// Scripted responses keyed by query
    responses: HashMap<String, MockResponse>,
    /// Fetch count per query
    fetch_counts: Mutex<HashMap<String, usize>>,
}

impl MockRegistry {
    /// Create an empty mock registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a plain-text document for a query
    pub fn document(mut self, query: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses.insert(
            query.into(),
            MockResponse::Document(Bytes::from(text.into())),
        );
        self
    }

    /// Make a query fail with a protocol error
    pub fn failing(mut self, query: impl Into<String>) -> Self {
        self.responses.insert(query.into(), MockResponse::Fail);
        self
    }

    /// Number of times a query has been fetched
    pub fn fetch_count(&self, query: &str) -> usize {
        self.fetch_counts.lock().get(query).copied().unwrap_or(0)
    }
}

#[async_trait]
impl DocumentFetcher for MockRegistry {
    async fn fetch_document(&self, query: &str) -> Result<Bytes, RegistryError> {
        *self
            .fetch_counts
            .lock()
            .entry(query.to_string())
            .or_insert(0) += 1;

        match self.responses.get(query) {
            Some(MockResponse::Document(bytes)) => Ok(bytes.clone()),
            Some(MockResponse::Fail) => Err(RegistryError::Protocol(
                "empty result or unknown status".to_string(),
            )),
            None => Err(RegistryError::Protocol(format!(
                "no scripted document for query '{}'",
                query
            ))),
        }
    }
}
