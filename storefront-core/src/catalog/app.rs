//! The App record shared by all three marketplace categories
//!
//! Every app carries a developer handle, name, size, version, cost, and its
//! accumulated ratings. The category payload ([`AppKind`]) adds the one
//! discriminating attribute and drives the per-category recommendation rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::developer::DeveloperRef;
use crate::validation;

use super::Rating;

/// The three marketplace categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Education,
    Game,
    Productivity,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Game => "Game",
            Category::Productivity => "Productivity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category payload: the discriminating attribute of each app variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum AppKind {
    /// Difficulty level in `[1, 10]`, 0 while unset
    Education { level: u8 },
    /// Whether the game supports multiplayer
    Game { multiplayer: bool },
    Productivity,
}

/// One marketplace app record.
///
/// Numeric setters are fail-soft: an out-of-range value leaves the prior
/// value in place. Each setter is independent, so a multi-field update
/// applies the valid fields and keeps the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    developer: DeveloperRef,
    name: String,
    size: f64,
    version: f64,
    cost: f64,
    ratings: Vec<Rating>,
    kind: AppKind,
}

impl App {
    fn base(developer: DeveloperRef, name: &str, kind: AppKind) -> Self {
        Self {
            developer,
            name: name.to_string(),
            size: 0.0,
            version: 1.0,
            cost: 0.0,
            ratings: Vec::new(),
            kind,
        }
    }

    fn with_shared_fields(mut self, size: f64, version: f64, cost: f64) -> Self {
        self.set_size(size);
        self.set_version(version);
        self.set_cost(cost);
        self
    }

    /// Build an education app. All fields pass through the fail-soft setters.
    pub fn education(
        developer: DeveloperRef,
        name: &str,
        size: f64,
        version: f64,
        cost: f64,
        level: u8,
    ) -> Self {
        let mut app = Self::base(developer, name, AppKind::Education { level: 0 })
            .with_shared_fields(size, version, cost);
        app.set_level(level);
        app
    }

    /// Build a game app. All fields pass through the fail-soft setters.
    pub fn game(
        developer: DeveloperRef,
        name: &str,
        size: f64,
        version: f64,
        cost: f64,
        multiplayer: bool,
    ) -> Self {
        Self::base(developer, name, AppKind::Game { multiplayer })
            .with_shared_fields(size, version, cost)
    }

    /// Build a productivity app. All fields pass through the fail-soft
    /// setters.
    pub fn productivity(
        developer: DeveloperRef,
        name: &str,
        size: f64,
        version: f64,
        cost: f64,
    ) -> Self {
        Self::base(developer, name, AppKind::Productivity).with_shared_fields(size, version, cost)
    }

    pub fn developer(&self) -> &DeveloperRef {
        &self.developer
    }

    pub fn set_developer(&mut self, developer: DeveloperRef) {
        self.developer = developer;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Accepts sizes in `[1, 1000]` MB; anything else keeps the prior value.
    pub fn set_size(&mut self, size: f64) {
        if validation::valid_range(size, 1.0, 1000.0) {
            self.size = size;
        }
    }

    pub fn version(&self) -> f64 {
        self.version
    }

    /// Accepts versions of at least 1.0; anything else keeps the prior value.
    pub fn set_version(&mut self, version: f64) {
        if version >= 1.0 {
            self.version = version;
        }
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Accepts non-negative costs; anything else keeps the prior value.
    pub fn set_cost(&mut self, cost: f64) {
        if cost >= 0.0 {
            self.cost = cost;
        }
    }

    pub fn kind(&self) -> &AppKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        match self.kind {
            AppKind::Education { .. } => Category::Education,
            AppKind::Game { .. } => Category::Game,
            AppKind::Productivity => Category::Productivity,
        }
    }

    /// The education difficulty level; `None` for other categories.
    pub fn level(&self) -> Option<u8> {
        match self.kind {
            AppKind::Education { level } => Some(level),
            _ => None,
        }
    }

    /// Accepts levels in `[1, 10]` on education apps; a no-op on other
    /// categories or out-of-range values.
    pub fn set_level(&mut self, level: u8) {
        if let AppKind::Education { level: current } = &mut self.kind {
            if validation::valid_range(level, 1, 10) {
                *current = level;
            }
        }
    }

    /// The multiplayer flag; `None` for non-game categories.
    pub fn multiplayer(&self) -> Option<bool> {
        match self.kind {
            AppKind::Game { multiplayer } => Some(multiplayer),
            _ => None,
        }
    }

    /// Set the multiplayer flag on game apps; a no-op on other categories.
    pub fn set_multiplayer(&mut self, multiplayer: bool) {
        if let AppKind::Game {
            multiplayer: current,
        } = &mut self.kind
        {
            *current = multiplayer;
        }
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Append a rating. No cap, no dedup.
    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// One line per rating in insertion order, or `No ratings added`.
    pub fn list_ratings(&self) -> String {
        if self.ratings.is_empty() {
            return "No ratings added\n".to_string();
        }
        let mut list = String::new();
        for rating in &self.ratings {
            list.push_str(&format!("{rating}\n"));
        }
        list
    }

    /// Mean of all ratings with a non-zero star count. `0.0` when the list
    /// is empty or every rating carries zero stars.
    pub fn average_rating(&self) -> f64 {
        let mut total = 0u32;
        let mut counted = 0u32;
        for rating in &self.ratings {
            if rating.stars() != 0 {
                total += u32::from(rating.stars());
                counted += 1;
            }
        }
        if counted == 0 {
            return 0.0;
        }
        f64::from(total) / f64::from(counted)
    }

    /// The per-category recommendation rule.
    pub fn is_recommended(&self) -> bool {
        match self.kind {
            AppKind::Education { level } => {
                self.cost > 0.99 && level >= 3 && self.average_rating() >= 3.5
            }
            AppKind::Game { multiplayer } => multiplayer && self.average_rating() >= 4.0,
            AppKind::Productivity => self.cost >= 1.99 && self.average_rating() > 3.0,
        }
    }

    /// One-line summary embedding the labelled category attribute, used by
    /// the summary and recommendation listings.
    pub fn summary(&self) -> String {
        let base = format!(
            "{}(V{}) by {}, €{:.2}. Rating: {}",
            self.name,
            self.version,
            self.developer,
            self.cost,
            validation::to_two_decimal_places(self.average_rating())
        );
        match self.kind {
            AppKind::Education { level } => format!("{base} level {level}"),
            AppKind::Game { multiplayer } => {
                format!("{base}\t Multiplayer: {}", validation::bool_to_yn(multiplayer))
            }
            AppKind::Productivity => base,
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} App:", self.category())?;
        writeln!(
            f,
            "{} (Version {}), Developer: {}, {}MB, Cost: {:.2}, Ratings ({})",
            self.name,
            self.version,
            self.developer,
            self.size,
            self.cost,
            validation::to_two_decimal_places(self.average_rating())
        )?;
        write!(f, "List of ratings:\n{}", self.list_ratings())?;
        match self.kind {
            AppKind::Education { level } => write!(f, "Level: {level}"),
            AppKind::Game { multiplayer } => {
                write!(f, "Multiplayer: {}", validation::bool_to_yn(multiplayer))
            }
            AppKind::Productivity => Ok(()),
        }
    }
}

#[cfg(test)]
mod app_tests {
    use super::*;
    use crate::developer::Developer;

    fn lego() -> DeveloperRef {
        DeveloperRef::new(Developer::new("Lego", "https://www.lego.com"))
    }

    fn apple() -> DeveloperRef {
        DeveloperRef::new(Developer::new("Apple", "https://www.apple.com"))
    }

    #[test]
    fn test_construction_clamps_every_field() {
        // In-range values are all kept.
        let app = App::education(lego(), "Spike", 1000.0, 2.0, 1.99, 10);
        assert_eq!(app.size(), 1000.0);
        assert_eq!(app.version(), 2.0);
        assert_eq!(app.cost(), 1.99);
        assert_eq!(app.level(), Some(10));

        // Out-of-range values keep the defaults, independently per field.
        let app = App::education(lego(), "EV3", 1001.0, 3.5, 2.99, 11);
        assert_eq!(app.size(), 0.0);
        assert_eq!(app.version(), 3.5);
        assert_eq!(app.cost(), 2.99);
        assert_eq!(app.level(), Some(0));

        let app = App::education(lego(), "", -1.0, 0.0, -1.0, 0);
        assert_eq!(app.name(), "");
        assert_eq!(app.size(), 0.0);
        assert_eq!(app.version(), 1.0);
        assert_eq!(app.cost(), 0.0);
        assert_eq!(app.level(), Some(0));
    }

    #[test]
    fn test_set_size_never_leaves_range() {
        let mut app = App::productivity(apple(), "NoteKeeper", 10.0, 1.0, 0.0);
        for bad in [0.0, 0.99, 1000.01, -5.0, f64::NAN] {
            app.set_size(bad);
            assert_eq!(app.size(), 10.0);
        }
        app.set_size(1.0);
        assert_eq!(app.size(), 1.0);
        app.set_size(1000.0);
        assert_eq!(app.size(), 1000.0);
    }

    #[test]
    fn test_set_version_and_cost_clamp() {
        let mut app = App::productivity(apple(), "Pages", 10.0, 2.0, 1.0);
        app.set_version(0.9);
        assert_eq!(app.version(), 2.0);
        app.set_version(3.5);
        assert_eq!(app.version(), 3.5);

        app.set_cost(-0.01);
        assert_eq!(app.cost(), 1.0);
        app.set_cost(0.0);
        assert_eq!(app.cost(), 0.0);
    }

    #[test]
    fn test_level_setter_ignores_other_categories() {
        let mut game = App::game(lego(), "CookOff", 10.0, 1.0, 1.99, true);
        game.set_level(5);
        assert_eq!(game.level(), None);

        let mut education = App::education(lego(), "WeDo", 10.0, 1.0, 1.0, 3);
        education.set_level(11);
        assert_eq!(education.level(), Some(3));
        education.set_multiplayer(true);
        assert_eq!(education.multiplayer(), None);
    }

    #[test]
    fn test_average_rating() {
        let mut app = App::education(lego(), "WeDo", 1.0, 1.0, 1.0, 3);
        assert_eq!(app.average_rating(), 0.0);

        app.add_rating(Rating::new(3, "John Doe", "Very Good"));
        app.add_rating(Rating::new(4, "Jane Doe", "Excellent"));
        assert_eq!(app.average_rating(), 3.5);
    }

    #[test]
    fn test_average_rating_excludes_zero_star_votes() {
        let mut app = App::game(lego(), "Tetris", 1.0, 1.0, 0.0, false);
        app.add_rating(Rating::new(0, "JohnD", "Poor App"));
        assert_eq!(app.average_rating(), 0.0);

        app.add_rating(Rating::new(4, "MarkD", "Great App"));
        assert_eq!(app.average_rating(), 4.0);
    }

    #[test]
    fn test_education_recommendation_boundaries() {
        let mut app = App::education(lego(), "WeDo", 1.0, 1.0, 1.0, 3);
        app.add_rating(Rating::new(3, "John Doe", "Very Good"));
        app.add_rating(Rating::new(4, "Jane Doe", "Excellent"));
        assert!(app.is_recommended());

        let mut cheap = App::education(lego(), "WeDo", 1.0, 1.0, 0.99, 3);
        cheap.add_rating(Rating::new(3, "John Doe", "Very Good"));
        cheap.add_rating(Rating::new(4, "Jane Doe", "Excellent"));
        assert!(!cheap.is_recommended());

        let mut low_level = App::education(lego(), "WeDo", 1.0, 1.0, 1.0, 2);
        low_level.add_rating(Rating::new(3, "John Doe", "Very Good"));
        low_level.add_rating(Rating::new(4, "Jane Doe", "Excellent"));
        assert!(!low_level.is_recommended());
    }

    #[test]
    fn test_game_recommendation_boundaries() {
        let mut app = App::game(lego(), "MazeRunner", 1.0, 1.0, 1.0, true);
        app.add_rating(Rating::new(5, "John Soap", "Exciting Game"));
        app.add_rating(Rating::new(5, "Jane Soap", "Nice Game"));
        assert!(app.is_recommended());

        let mut low_rated = App::game(lego(), "MazeRunner", 1.0, 1.0, 1.0, true);
        low_rated.add_rating(Rating::new(2, "John Soap", "Exciting Game"));
        low_rated.add_rating(Rating::new(2, "Jane Soap", "Nice Game"));
        assert!(!low_rated.is_recommended());

        let mut single_player = App::game(lego(), "Tetris", 1.0, 1.0, 1.0, false);
        single_player.add_rating(Rating::new(5, "John Soap", "Exciting Game"));
        single_player.add_rating(Rating::new(5, "Jane Soap", "Nice Game"));
        assert!(!single_player.is_recommended());
    }

    #[test]
    fn test_productivity_recommendation_boundaries() {
        let mut app = App::productivity(apple(), "Evernote", 1.0, 1.0, 1.99);
        app.add_rating(Rating::new(3, "John101", "So easy to add a note"));
        app.add_rating(Rating::new(4, "Jane202", "So useful"));
        assert!(app.is_recommended());

        // average exactly 3.0 is not enough: the rule is strictly greater
        let mut on_average = App::productivity(apple(), "Outlook", 1.0, 1.0, 1.99);
        on_average.add_rating(Rating::new(3, "John101", "So useful"));
        assert!(!on_average.is_recommended());
    }

    #[test]
    fn test_summary_embeds_labelled_attribute() {
        let education = App::education(lego(), "WeDo", 1.0, 1.0, 1.0, 3);
        assert!(education.summary().contains("level 3"));

        let game = App::game(lego(), "CookOff", 1.0, 1.0, 1.99, true);
        assert!(game.summary().contains("Multiplayer: Y"));

        let solo = App::game(lego(), "Tetris", 1.0, 1.0, 0.0, false);
        assert!(solo.summary().contains("Multiplayer: N"));

        let productivity = App::productivity(apple(), "Pages", 1.0, 1.0, 2.99);
        assert!(productivity.summary().contains("Pages(V1) by Apple"));
    }

    #[test]
    fn test_display_names_the_category() {
        let app = App::education(lego(), "WeDo", 1.0, 1.0, 1.0, 3);
        let text = app.to_string();
        assert!(text.starts_with("Education App:"));
        assert!(text.contains("No ratings added"));
        assert!(text.contains("Level: 3"));
    }

    #[test]
    fn test_shared_developer_update_is_visible() {
        let handle = lego();
        let app = App::education(handle.clone(), "WeDo", 1.0, 1.0, 1.0, 3);

        handle.set_website("https://education.lego.com");
        assert_eq!(app.developer().website(), "https://education.lego.com");
    }
}
