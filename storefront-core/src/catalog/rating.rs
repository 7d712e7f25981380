//! User ratings and the demo rating generator

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation;

/// Rater names used by the demo rating generator
const RATER_NAMES: &[&str] = &[
    "JohnD", "Adam101", "Eve101", "Cary1987", "RickyW", "MarkD", "Scotty", "Mary3", "Flynn121",
];

/// Comments used by the demo rating generator
const RATING_COMMENTS: &[&str] = &[
    "Loved the UX",
    "Great App",
    "Poor App",
    "Couldn't stop using app",
    "Used once, never again",
    "Too expensive",
    "Too slow",
    "Really intuitive",
    "Not for me",
];

/// A single user vote on an app.
///
/// Construction is fail-soft: a rejected field (out-of-range stars, empty
/// string) keeps its default instead of erroring. There is no mutation path
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    stars: u8,
    author: String,
    comment: String,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            stars: 0,
            author: "<rater name>".to_string(),
            comment: "<no comment>".to_string(),
        }
    }
}

impl Rating {
    /// Build a rating, applying the fail-soft rules per field: stars must be
    /// in `[1, 5]`, author and comment must be non-empty.
    pub fn new(stars: u8, author: &str, comment: &str) -> Self {
        let mut rating = Self::default();
        if validation::valid_range(stars, 1, 5) {
            rating.stars = stars;
        }
        if !author.is_empty() {
            rating.author = author.to_string();
        }
        if !comment.is_empty() {
            rating.comment = comment.to_string();
        }
        rating
    }

    pub fn stars(&self) -> u8 {
        self.stars
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stars (by {}). \"{}\"", self.stars, self.author, self.comment)
    }
}

/// Generate one demo rating.
///
/// The star draw ranges over `0..=4`: a zero-star draw is rejected by the
/// fail-soft constructor, leaving a zero-star rating that aggregation
/// excludes. This mirrors the demo data feed the catalog's rating simulation
/// distributes.
pub fn random_rating(rng: &mut impl Rng) -> Rating {
    let stars = rng.gen_range(0..5);
    let author = RATER_NAMES.choose(rng).copied().unwrap_or("JohnD");
    let comment = RATING_COMMENTS.choose(rng).copied().unwrap_or("Great App");
    Rating::new(stars, author, comment)
}
