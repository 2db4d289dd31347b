//! Remote searchers for the selection component
//!
//! Adapters that plug the registry search endpoints into
//! [`SearchableSelect`](fieldform_core::SearchableSelect). Minimum query
//! length is policy that belongs here, not in the component: a non-empty
//! query below the threshold is skipped (`Ok(None)`), keeping whatever list
//! is already displayed.

use async_trait::async_trait;

use fieldform_core::select::{SearchError, Searcher};

use crate::ApiClient;

/// Searches the salesman registry. Queries shorter than two characters are
/// skipped; an empty query returns the unfiltered head of the registry.
pub struct SalesmanSearcher {
    client: ApiClient,
    min_len: usize,
}

impl SalesmanSearcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client, min_len: 2 }
    }
}

#[async_trait]
impl Searcher for SalesmanSearcher {
    async fn search(&self, query: &str) -> Result<Option<Vec<String>>, SearchError> {
        let query = query.trim();
        if !query.is_empty() && query.len() < self.min_len {
            return Ok(None);
        }
        self.client
            .search_salesmen(query)
            .await
            .map(Some)
            .map_err(SearchError::new)
    }
}

/// Searches the village registry. The village list is large, so the
/// threshold is three characters.
pub struct VillageSearcher {
    client: ApiClient,
    min_len: usize,
}

impl VillageSearcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client, min_len: 3 }
    }
}

#[async_trait]
impl Searcher for VillageSearcher {
    async fn search(&self, query: &str) -> Result<Option<Vec<String>>, SearchError> {
        let query = query.trim();
        if !query.is_empty() && query.len() < self.min_len {
            return Ok(None);
        }
        self.client
            .search_villages(query)
            .await
            .map(Some)
            .map_err(SearchError::new)
    }
}
