//! Tolerant decoding of page payloads.

use eden_core::{Candidate, Page, PageResponse};

/// Decode a raw JSON payload into a normalized page.
///
/// Accepts both backend shapes (bare array, `results`/`next` envelope).
/// A payload matching neither decodes to an empty page: the panel shows
/// "no results" instead of the widget crashing on a malformed response.
pub fn decode_page(value: serde_json::Value, page_size: u32) -> Page<Candidate> {
    match serde_json::from_value::<PageResponse<Candidate>>(value) {
        Ok(response) => response.normalize(page_size as usize),
        Err(e) => {
            tracing::warn!("malformed page payload, treating as empty: {}", e);
            Page::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_bare_array() {
        let payload = json!([
            {"id": "1", "label": "Rose bush"},
            {"id": "2", "label": "Rosemary", "quantity_available": 4},
        ]);
        let page = decode_page(payload, 25);
        assert_eq!(page.len(), 2);
        assert!(!page.has_next);
        assert_eq!(page.items[1].quantity_available, Some(4));
    }

    #[test]
    fn test_decode_envelope() {
        let payload = json!({
            "results": [{"id": "1", "label": "Rose bush"}],
            "next": "page=2",
        });
        let page = decode_page(payload, 25);
        assert_eq!(page.len(), 1);
        assert!(page.has_next);
    }

    #[test]
    fn test_decode_full_page_heuristic() {
        let payload = json!({
            "results": [
                {"id": "1", "label": "a"},
                {"id": "2", "label": "b"},
            ],
        });
        // Exactly page_size: assume more may exist.
        assert!(decode_page(payload.clone(), 2).has_next);
        // Short page: exhausted.
        assert!(!decode_page(payload, 25).has_next);
    }

    #[test]
    fn test_malformed_payload_is_empty_page() {
        let page = decode_page(json!({"unexpected": true}), 25);
        assert!(page.is_empty());
        assert!(!page.has_next);

        let page = decode_page(json!("nonsense"), 25);
        assert!(page.is_empty());
    }

    #[test]
    fn test_items_missing_required_fields_are_malformed() {
        // An item without a label does not match Candidate; the whole
        // payload falls back to empty rather than panicking.
        let page = decode_page(json!([{"id": "1"}]), 25);
        assert!(page.is_empty());
    }
}
