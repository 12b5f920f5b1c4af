//! In-memory candidate source.
//!
//! `StaticCatalog` backs the demo binary and most tests. It matches
//! case-insensitively over label and detail, pages the result, and can
//! simulate backend latency so stale-response handling can be
//! exercised end to end.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;

use eden_core::{Candidate, CandidateId, Page, SourceError};

use crate::CandidateSource;

/// One recorded `fetch_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

/// An in-memory source over a fixed candidate list.
#[derive(Clone)]
pub struct StaticCatalog {
    items: Arc<Vec<Candidate>>,
    latency: Duration,
    requests: Arc<Mutex<Vec<PageRequest>>>,
}

impl StaticCatalog {
    /// Create a catalog over the given candidates.
    pub fn new(items: Vec<Candidate>) -> Self {
        Self {
            items: Arc::new(items),
            latency: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Simulate backend latency on every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// All `fetch_page` calls seen so far, in order.
    pub fn page_requests(&self) -> Vec<PageRequest> {
        self.requests.lock().clone()
    }

    /// Number of `fetch_page` calls seen so far.
    pub fn page_request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn matches(candidate: &Candidate, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        candidate.label.to_lowercase().contains(&needle)
            || candidate
                .detail
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

impl CandidateSource for StaticCatalog {
    fn fetch_page(
        &self,
        query: Option<String>,
        page: u32,
        page_size: u32,
    ) -> BoxFuture<'static, Result<Page<Candidate>, SourceError>> {
        self.requests.lock().push(PageRequest {
            query: query.clone(),
            page,
            page_size,
        });

        let items = self.items.clone();
        let latency = self.latency;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let needle = query.as_deref().unwrap_or("");
            let filtered: Vec<Candidate> = items
                .iter()
                .filter(|c| Self::matches(c, needle))
                .cloned()
                .collect();

            let page_size = page_size as usize;
            let start = page.saturating_sub(1) as usize * page_size;
            let end = (start + page_size).min(filtered.len());

            if start >= filtered.len() {
                return Ok(Page::empty());
            }

            Ok(Page {
                items: filtered[start..end].to_vec(),
                has_next: end < filtered.len(),
            })
        })
    }

    fn fetch_by_id(
        &self,
        id: CandidateId,
    ) -> BoxFuture<'static, Result<Candidate, SourceError>> {
        let items = self.items.clone();
        let latency = self.latency;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            items
                .iter()
                .find(|c| c.id == id.as_ref())
                .cloned()
                .ok_or_else(|| SourceError::NotFound(id.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            Candidate::new("1", "Rose bush").with_quantity(5),
            Candidate::new("2", "Rosemary").with_detail("Herb, drought tolerant"),
            Candidate::new("3", "Fern"),
            Candidate::new("4", "Garden hose"),
            Candidate::new("5", "Primrose"),
        ])
    }

    #[tokio::test]
    async fn test_empty_query_returns_everything() {
        let source = catalog();
        let page = source.fetch_page(None, 1, 25).await.unwrap();
        assert_eq!(page.len(), 5);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn test_query_matches_label_and_detail() {
        let source = catalog();
        let page = source
            .fetch_page(Some("rose".to_string()), 1, 25)
            .await
            .unwrap();
        let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "5"]);

        let page = source
            .fetch_page(Some("drought".to_string()), 1, 25)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].id, "2");
    }

    #[tokio::test]
    async fn test_paging() {
        let source = catalog();
        let page1 = source.fetch_page(None, 1, 2).await.unwrap();
        assert_eq!(page1.len(), 2);
        assert!(page1.has_next);

        let page2 = source.fetch_page(None, 2, 2).await.unwrap();
        assert_eq!(page2.len(), 2);
        assert!(page2.has_next);

        let page3 = source.fetch_page(None, 3, 2).await.unwrap();
        assert_eq!(page3.len(), 1);
        assert!(!page3.has_next);

        let page4 = source.fetch_page(None, 4, 2).await.unwrap();
        assert!(page4.is_empty());
        assert!(!page4.has_next);
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let source = catalog();
        let c = source.fetch_by_id("3".into()).await.unwrap();
        assert_eq!(c.label, "Fern");

        let err = source.fetch_by_id("99".into()).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let source = catalog();
        let _ = source.fetch_page(Some("ro".to_string()), 1, 10).await;
        let _ = source.fetch_page(Some("rose".to_string()), 1, 10).await;

        let requests = source.page_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query.as_deref(), Some("ro"));
        assert_eq!(requests[1].query.as_deref(), Some("rose"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let source = catalog().with_latency(Duration::from_millis(40));
        let start = tokio::time::Instant::now();
        let _ = source.fetch_page(None, 1, 25).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
