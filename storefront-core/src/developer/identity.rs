//! Developer identity value and the shared handle apps hold

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A developer identity. Equality is structural: name AND website must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    /// Developer name (e.g., "Lego")
    pub name: String,

    /// Developer website URL
    pub website: String,
}

impl Developer {
    pub fn new(name: &str, website: &str) -> Self {
        Self {
            name: name.to_string(),
            website: website.to_string(),
        }
    }
}

impl fmt::Display for Developer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.website)
    }
}

/// Shared handle to a [`Developer`].
///
/// The registry owns one handle per developer and apps hold clones of it, so
/// an in-place update (a new website) is visible everywhere. Serialization
/// inlines the developer value; a reloaded handle restores value equality,
/// not shared identity, because the catalog and registry snapshots are
/// written independently.
#[derive(Debug, Clone)]
pub struct DeveloperRef(Rc<RefCell<Developer>>);

impl DeveloperRef {
    pub fn new(developer: Developer) -> Self {
        Self(Rc::new(RefCell::new(developer)))
    }

    /// Borrow the underlying developer value.
    pub fn get(&self) -> Ref<'_, Developer> {
        self.0.borrow()
    }

    /// Clone out the current developer value.
    pub fn value(&self) -> Developer {
        self.0.borrow().clone()
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn website(&self) -> String {
        self.0.borrow().website.clone()
    }

    /// Replace the website in place; visible through every clone of this
    /// handle.
    pub fn set_website(&self, website: &str) {
        self.0.borrow_mut().website = website.to_string();
    }

    /// Structural comparison against a plain developer value.
    pub fn matches(&self, other: &Developer) -> bool {
        *self.0.borrow() == *other
    }
}

impl PartialEq for DeveloperRef {
    fn eq(&self, other: &Self) -> bool {
        *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Display for DeveloperRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.borrow())
    }
}

impl Serialize for DeveloperRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeveloperRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Developer::deserialize(deserializer).map(DeveloperRef::new)
    }
}

#[cfg(test)]
mod identity_tests {
    use super::*;

    #[test]
    fn test_equality_is_structural() {
        let lego = Developer::new("Lego", "https://www.lego.com");
        let same = Developer::new("Lego", "https://www.lego.com");
        let other_site = Developer::new("Lego", "https://lego.dev");

        assert_eq!(lego, same);
        assert_ne!(lego, other_site);
    }

    #[test]
    fn test_website_update_visible_through_clones() {
        let handle = DeveloperRef::new(Developer::new("Sphero", "https://www.sphero.com"));
        let held_by_app = handle.clone();

        handle.set_website("https://sphero.edu");

        assert_eq!(held_by_app.website(), "https://sphero.edu");
        assert!(held_by_app.matches(&Developer::new("Sphero", "https://sphero.edu")));
    }

    #[test]
    fn test_display_format() {
        let dev = Developer::new("Apple", "https://www.apple.com");
        assert_eq!(dev.to_string(), "Apple(https://www.apple.com)");
        assert_eq!(DeveloperRef::new(dev).to_string(), "Apple(https://www.apple.com)");
    }
}
