//! The app store catalog engine
//!
//! Owns the ordered app collection and every cross-record query, aggregate,
//! listing, sort, and mutation, plus the snapshot persistence boundary.
//!
//! Listing contract: an empty catalog (or an empty matching subset) yields a
//! fixed sentinel string; otherwise a header line followed by one formatted
//! line per matching app in catalog order. Each line re-resolves its index by
//! name rather than using the loop position; with duplicate names every
//! duplicate line repeats the first index, which is the inherited behavior.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::developer::{Developer, DeveloperRef};
use crate::error::CatalogError;
use crate::validation;
use crate::API_VERSION;

use super::rating::random_rating;
use super::{App, Category};

/// The catalog file payload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogSnapshot {
    /// API version for schema compatibility
    api_version: String,
    /// When this snapshot was written
    generated: String,
    /// All apps, in catalog order
    apps: Vec<App>,
}

/// Ordered collection of apps. Duplicate names are allowed; insertion order
/// is preserved except when explicitly sorted.
#[derive(Debug, Default)]
pub struct AppStore {
    apps: Vec<App>,
}

impl AppStore {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an app to the catalog. Always succeeds.
    pub fn add_app(&mut self, app: App) -> bool {
        self.apps.push(app);
        true
    }

    /// The app at `index`; out-of-range yields `None`.
    pub fn app_by_index(&self, index: usize) -> Option<&App> {
        self.apps.get(index)
    }

    /// The first app whose name matches exactly (case-sensitive).
    pub fn app_by_name(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|app| app.name() == name)
    }

    /// Position of the first app whose name matches, ignoring case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.apps
            .iter()
            .position(|app| app.name().eq_ignore_ascii_case(name))
    }

    /// Remove and return the app at `index`; out-of-range leaves the catalog
    /// unchanged and yields `None`.
    pub fn delete_app_by_index(&mut self, index: usize) -> Option<App> {
        if validation::valid_index(index, self.apps.len()) {
            Some(self.apps.remove(index))
        } else {
            None
        }
    }

    /// Overwrite the education app at `index`. False when the index is
    /// invalid or the app there is of another category. Each field passes
    /// through its fail-soft setter independently.
    pub fn update_education_app(
        &mut self,
        index: usize,
        developer: DeveloperRef,
        name: &str,
        size: f64,
        version: f64,
        cost: f64,
        level: u8,
    ) -> bool {
        match self.apps.get_mut(index) {
            Some(app) if app.category() == Category::Education => {
                app.set_developer(developer);
                app.set_name(name);
                app.set_size(size);
                app.set_version(version);
                app.set_cost(cost);
                app.set_level(level);
                true
            }
            _ => false,
        }
    }

    /// Overwrite the game app at `index`. False when the index is invalid or
    /// the app there is of another category.
    pub fn update_game_app(
        &mut self,
        index: usize,
        developer: DeveloperRef,
        name: &str,
        size: f64,
        version: f64,
        cost: f64,
        multiplayer: bool,
    ) -> bool {
        match self.apps.get_mut(index) {
            Some(app) if app.category() == Category::Game => {
                app.set_developer(developer);
                app.set_name(name);
                app.set_size(size);
                app.set_version(version);
                app.set_cost(cost);
                app.set_multiplayer(multiplayer);
                true
            }
            _ => false,
        }
    }

    /// Overwrite the productivity app at `index`. False when the index is
    /// invalid or the app there is of another category.
    pub fn update_productivity_app(
        &mut self,
        index: usize,
        developer: DeveloperRef,
        name: &str,
        size: f64,
        version: f64,
        cost: f64,
    ) -> bool {
        match self.apps.get_mut(index) {
            Some(app) if app.category() == Category::Productivity => {
                app.set_developer(developer);
                app.set_name(name);
                app.set_size(size);
                app.set_version(version);
                app.set_cost(cost);
                true
            }
            _ => false,
        }
    }

    pub fn number_of_apps(&self) -> usize {
        self.apps.len()
    }

    pub fn number_of_apps_by_category(&self, category: Category) -> usize {
        self.apps
            .iter()
            .filter(|app| app.category() == category)
            .count()
    }

    pub fn number_of_apps_by_developer(&self, developer: &Developer) -> usize {
        self.apps
            .iter()
            .filter(|app| app.developer().matches(developer))
            .count()
    }

    /// All apps in catalog order
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    fn listing(
        &self,
        sentinel: &str,
        header: &str,
        matches: impl Fn(&App) -> bool,
        line: impl Fn(&App) -> String,
    ) -> String {
        let mut lines = String::new();
        for app in &self.apps {
            if !matches(app) {
                continue;
            }
            if let Some(index) = self.index_of(app.name()) {
                lines.push_str(&format!("Index: {index} {}\n", line(app)));
            }
        }
        if lines.is_empty() {
            return sentinel.to_string();
        }
        format!("{header}\n{lines}")
    }

    /// Every app in catalog order, or `No apps added yet`.
    pub fn list_all_apps(&self) -> String {
        self.listing("No apps added yet", "Apps:", |_| true, |app| app.to_string())
    }

    /// Every app's one-line summary, or `No apps`.
    pub fn list_summary_of_all_apps(&self) -> String {
        self.listing("No apps", "List of every App:", |_| true, |app| app.summary())
    }

    /// Every app of one category, or the per-category sentinel.
    pub fn list_apps_by_category(&self, category: Category) -> String {
        self.listing(
            &format!("No {category} apps"),
            &format!("List of every {category} App:"),
            |app| app.category() == category,
            |app| app.to_string(),
        )
    }

    /// Every app whose name contains `name`, ignoring case.
    pub fn list_apps_by_name(&self, name: &str) -> String {
        let query = name.to_lowercase();
        self.listing(
            "No apps of this name.",
            "List of every App with this name:",
            |app| app.name().to_lowercase().contains(query.as_str()),
            |app| app.to_string(),
        )
    }

    /// Every app whose average rating is at least `rating`.
    pub fn list_apps_above_or_equal_rating(&self, rating: u32) -> String {
        self.listing(
            &format!("No apps have a rating of {rating} or above."),
            "List of every App with this rating or higher:",
            |app| app.average_rating() >= f64::from(rating),
            |app| app.to_string(),
        )
    }

    /// Every app by the given developer (structural equality).
    pub fn list_apps_by_developer(&self, developer: &Developer) -> String {
        self.listing(
            &format!("No apps for developer: {developer}"),
            "List of every App from this developer:",
            |app| app.developer().matches(developer),
            |app| app.to_string(),
        )
    }

    /// Every recommended app's summary, or `No recommended apps`.
    pub fn list_recommended_apps(&self) -> String {
        self.listing(
            "No recommended apps",
            "Recommended Apps:",
            |app| app.is_recommended(),
            |app| app.summary(),
        )
    }

    /// Every recommended app of one category.
    pub fn list_recommended_apps_by_category(&self, category: Category) -> String {
        self.listing(
            &format!("No recommended {category} apps"),
            &format!("Recommended {category} Apps:"),
            |app| app.is_recommended() && app.category() == category,
            |app| app.summary(),
        )
    }

    /// Pick one app uniformly at random. Fails on an empty catalog.
    pub fn random_app(&self, rng: &mut impl Rng) -> Result<&App, CatalogError> {
        self.apps.choose(rng).ok_or(CatalogError::EmptyCatalog)
    }

    /// Append one generated rating to every app in the catalog. The rating
    /// values come from the demo generator; the catalog only distributes
    /// them.
    pub fn simulate_ratings(&mut self, rng: &mut impl Rng) {
        for app in &mut self.apps {
            app.add_rating(random_rating(rng));
        }
    }

    /// Sort the catalog by app name, ascending, case-sensitive.
    ///
    /// Selection-sort variant: each pass from the end of the list backwards
    /// finds the lexicographically largest name in the unsorted prefix
    /// (strict comparison, so the lowest index wins among equal names) and
    /// swaps it into the current position. O(n²), no early exit, not stable.
    pub fn sort_apps_by_name_ascending(&mut self) {
        for current in (0..self.apps.len()).rev() {
            let mut highest = 0;
            for candidate in 0..=current {
                if self.apps[candidate].name() > self.apps[highest].name() {
                    highest = candidate;
                }
            }
            self.swap_apps(current, highest);
        }
    }

    /// In-place swap of the apps at two positions.
    fn swap_apps(&mut self, current: usize, highest: usize) {
        self.apps.swap(current, highest);
    }

    /// Load a catalog snapshot. Missing or malformed files are errors; the
    /// caller's in-memory catalog is only replaced on success.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        let snapshot: CatalogSnapshot = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        if snapshot.api_version != API_VERSION {
            anyhow::bail!(
                "Unsupported apiVersion '{}' in {}. Expected '{}'",
                snapshot.api_version,
                path.display(),
                API_VERSION
            );
        }

        tracing::debug!("Loaded {} app(s) from {}", snapshot.apps.len(), path.display());

        Ok(Self {
            apps: snapshot.apps,
        })
    }

    /// Load a catalog snapshot, or an empty catalog when the file does not
    /// exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    /// Write the catalog snapshot.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let snapshot = CatalogSnapshot {
            api_version: API_VERSION.to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            apps: self.apps.clone(),
        };

        let content =
            serde_yaml_ng::to_string(&snapshot).context("Failed to serialize catalog")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        tracing::debug!("Saved {} app(s) to {}", self.apps.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::developer::Developer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn apple() -> DeveloperRef {
        DeveloperRef::new(Developer::new("Apple", "https://www.apple.com"))
    }

    fn microsoft() -> DeveloperRef {
        DeveloperRef::new(Developer::new("Microsoft", "https://www.microsoft.com"))
    }

    #[test]
    fn test_add_and_find() {
        let mut store = AppStore::new();
        assert!(store.add_app(App::productivity(apple(), "Pages", 10.0, 1.0, 2.99)));
        assert!(store.add_app(App::productivity(apple(), "Pages", 12.0, 2.0, 0.0)));

        // duplicate names are allowed
        assert_eq!(store.number_of_apps(), 2);
        assert_eq!(store.app_by_index(0).unwrap().cost(), 2.99);
        assert!(store.app_by_index(2).is_none());

        // exact match is case-sensitive, index lookup is not
        assert!(store.app_by_name("pages").is_none());
        assert_eq!(store.app_by_name("Pages").unwrap().size(), 10.0);
        assert_eq!(store.index_of("PAGES"), Some(0));
        assert_eq!(store.index_of("Numbers"), None);
    }

    #[test]
    fn test_delete_by_index_is_bounds_checked() {
        let mut empty = AppStore::new();
        assert!(empty.delete_app_by_index(0).is_none());
        assert_eq!(empty.number_of_apps(), 0);

        let mut store = AppStore::new();
        store.add_app(App::productivity(apple(), "Pages", 10.0, 1.0, 2.99));
        assert!(store.delete_app_by_index(1).is_none());
        assert_eq!(store.number_of_apps(), 1);

        let deleted = store.delete_app_by_index(0).unwrap();
        assert_eq!(deleted.name(), "Pages");
        assert_eq!(store.number_of_apps(), 0);
    }

    #[test]
    fn test_update_checks_index_and_category() {
        let mut store = AppStore::new();
        store.add_app(App::productivity(microsoft(), "Outlook", 10.0, 1.0, 1.99));

        // wrong category at the index
        assert!(!store.update_game_app(0, microsoft(), "Outlook", 10.0, 1.0, 1.99, true));
        // out of range
        assert!(!store.update_productivity_app(1, microsoft(), "Outlook", 10.0, 1.0, 1.99));

        assert!(store.update_productivity_app(0, microsoft(), "Outlook365", 20.0, 2.0, 4.99));
        let app = store.app_by_index(0).unwrap();
        assert_eq!(app.name(), "Outlook365");
        assert_eq!(app.version(), 2.0);
    }

    #[test]
    fn test_update_applies_valid_fields_and_keeps_invalid_ones() {
        let mut store = AppStore::new();
        store.add_app(App::productivity(microsoft(), "Outlook", 10.0, 1.0, 1.99));

        // size and cost are out of range and must keep their prior values;
        // the sibling fields still apply.
        assert!(store.update_productivity_app(0, microsoft(), "Outlook365", 5000.0, 3.0, -1.0));
        let app = store.app_by_index(0).unwrap();
        assert_eq!(app.name(), "Outlook365");
        assert_eq!(app.size(), 10.0);
        assert_eq!(app.version(), 3.0);
        assert_eq!(app.cost(), 1.99);
    }

    #[test]
    fn test_counts_by_category_and_developer() {
        let mut store = AppStore::new();
        store.add_app(App::productivity(apple(), "Pages", 10.0, 1.0, 2.99));
        store.add_app(App::productivity(microsoft(), "Outlook", 10.0, 1.0, 1.99));
        store.add_app(App::game(microsoft(), "Solitaire", 5.0, 1.0, 0.0, false));

        assert_eq!(store.number_of_apps_by_category(Category::Productivity), 2);
        assert_eq!(store.number_of_apps_by_category(Category::Game), 1);
        assert_eq!(store.number_of_apps_by_category(Category::Education), 0);

        let microsoft_value = Developer::new("Microsoft", "https://www.microsoft.com");
        assert_eq!(store.number_of_apps_by_developer(&microsoft_value), 2);
        // equality is structural on name AND website
        let impostor = Developer::new("Microsoft", "https://example.com");
        assert_eq!(store.number_of_apps_by_developer(&impostor), 0);
    }

    #[test]
    fn test_random_app_fails_on_empty_catalog() {
        let store = AppStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            store.random_app(&mut rng),
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_random_app_picks_a_stored_app() {
        let mut store = AppStore::new();
        store.add_app(App::productivity(apple(), "Pages", 10.0, 1.0, 2.99));
        store.add_app(App::productivity(apple(), "Numbers", 10.0, 1.0, 2.99));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let picked = store.random_app(&mut rng).unwrap();
            assert!(store.apps().iter().any(|app| app.name() == picked.name()));
        }
    }

    #[test]
    fn test_simulate_ratings_appends_one_rating_per_app() {
        let mut store = AppStore::new();
        store.add_app(App::productivity(apple(), "Pages", 10.0, 1.0, 2.99));
        store.add_app(App::game(microsoft(), "Solitaire", 5.0, 1.0, 0.0, true));

        let mut rng = StdRng::seed_from_u64(42);
        store.simulate_ratings(&mut rng);
        store.simulate_ratings(&mut rng);

        for app in store.apps() {
            assert_eq!(app.ratings().len(), 2);
        }
    }

    #[test]
    fn test_save_and_load_round_trip_empty_catalog() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("apps.yaml");

        AppStore::new().save_to_path(&path).unwrap();
        let loaded = AppStore::load_from_path(&path).unwrap();
        assert_eq!(loaded.number_of_apps(), 0);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("apps.yaml");

        assert!(AppStore::load_from_path(&path).is_err());
        assert_eq!(
            AppStore::load_or_default(&path).unwrap().number_of_apps(),
            0
        );
    }

    #[test]
    fn test_load_rejects_unknown_api_version() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("apps.yaml");
        std::fs::write(
            &path,
            "apiVersion: storefront.dev/v0\ngenerated: \"2026-01-01T00:00:00Z\"\napps: []\n",
        )
        .unwrap();

        let result = AppStore::load_from_path(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("apiVersion"));
    }
}
