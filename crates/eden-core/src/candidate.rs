//! Candidate types for search results.

use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Stable candidate identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CandidateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate is the atomic unit of data offered for selection.
///
/// In the Eden catalog these are products (plants, tools, supplies),
/// but the picker never assumes more than this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier within the current result set.
    pub id: String,

    /// Primary display text.
    pub label: String,

    /// Secondary display text (e.g., a product description).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Image URL or icon identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Units currently in stock. `None` when the backend does not
    /// track stock for this kind of candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<u32>,

    /// Unit price. `None` for unpriced candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl Candidate {
    /// Create a new candidate with required fields.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            detail: None,
            image_url: None,
            quantity_available: None,
            unit_price: None,
        }
    }

    /// Builder-style detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builder-style stock quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity_available = Some(quantity);
        self
    }

    /// Builder-style unit price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Whether the candidate is known to be out of stock.
    ///
    /// Candidates without stock tracking are never considered out of
    /// stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity_available == Some(0)
    }

    /// Get the candidate's ID as a CandidateId.
    pub fn candidate_id(&self) -> CandidateId {
        CandidateId(self.id.clone())
    }
}
