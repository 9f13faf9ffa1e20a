//! Customer review domain types.

use serde::{Deserialize, Serialize};

use bistro_core::ReviewId;

/// A customer review shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,
    /// Reviewer's display name.
    pub name: String,
    /// Review text.
    pub details: String,
    /// Star rating, 0.0 to 5.0.
    pub rating: f64,
}

/// Input for creating a review (seeding only; there is no public write).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub name: String,
    pub details: String,
    pub rating: f64,
}
