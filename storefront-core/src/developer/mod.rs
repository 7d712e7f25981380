//! Developer identities and the registry that owns them
//!
//! Apps never own developers: they hold a [`DeveloperRef`] handle into the
//! registry's shared values, so a website update made through the registry is
//! visible through every referencing app.

mod identity;
mod registry;

pub use identity::{Developer, DeveloperRef};
pub use registry::DeveloperRegistry;
