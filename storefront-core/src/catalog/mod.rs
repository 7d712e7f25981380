//! App catalog - polymorphic app records and the store engine
//!
//! This module provides the marketplace's domain model:
//! - [`Rating`]: an immutable-once-constructed vote with fail-soft defaults
//! - [`App`]: the record shared by all three categories, with a per-category
//!   payload carrying the discriminating attribute and recommendation rule
//! - [`AppStore`]: the ordered collection owning all cross-record queries,
//!   aggregates, sorting, and mutation
//!
//! Field validation is fail-soft throughout: a setter given an out-of-range
//! value keeps the prior value and signals nothing.

mod app;
mod rating;
mod store;

pub use app::{App, AppKind, Category};
pub use rating::{random_rating, Rating};
pub use store::AppStore;
