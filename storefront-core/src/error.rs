//! Catalog error types
//!
//! Validation failures in this crate are silent (setters no-op, finders
//! return `Option`); only operations with no soft fallback surface a typed
//! error.

use thiserror::Error;

/// Errors surfaced by catalog operations that cannot fail soft
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Uniform selection needs at least one app in the catalog
    #[error("The catalog is empty; there is no app to pick")]
    EmptyCatalog,
}
