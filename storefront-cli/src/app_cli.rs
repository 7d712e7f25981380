//! App catalog CLI commands
//!
//! Every command loads the snapshot files, runs one catalog operation,
//! prints the catalog-produced listing or a rendered view, and saves when it
//! mutated the catalog.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, ValueEnum};
use std::path::Path;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use storefront_core::catalog::{App, AppStore, Category};
use storefront_core::developer::DeveloperRegistry;
use storefront_core::validation;

use crate::dev_cli::DEVELOPERS_FILE;

/// Catalog snapshot file name inside the data directory
pub const APPS_FILE: &str = "apps.yaml";

/// Category selector for the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Education,
    Game,
    Productivity,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Education => Category::Education,
            CategoryArg::Game => Category::Game,
            CategoryArg::Productivity => Category::Productivity,
        }
    }
}

/// Shared field flags for registering and updating apps
#[derive(Args, Debug)]
struct AppFields {
    /// Name of the app's registered developer
    #[clap(long)]
    developer: String,

    /// App name
    #[clap(long)]
    name: String,

    /// Size in MB (1-1000)
    #[clap(long)]
    size: f64,

    /// Version number (at least 1.0)
    #[clap(long, default_value_t = 1.0)]
    version: f64,

    /// Cost in euro (non-negative)
    #[clap(long, default_value_t = 0.0)]
    cost: f64,

    /// Education difficulty level (1-10)
    #[clap(long)]
    level: Option<u8>,

    /// Whether a game supports multiplayer
    #[clap(long)]
    multiplayer: bool,
}

#[derive(Parser, Debug)]
pub enum AppCommand {
    /// Register a new app (its developer must be registered first)
    Add {
        /// App category
        #[clap(long, value_enum)]
        category: CategoryArg,

        #[clap(flatten)]
        fields: AppFields,
    },

    /// Update the app at an index with new values
    Update {
        /// Catalog index of the app
        index: usize,

        /// App category (must match the app at the index)
        #[clap(long, value_enum)]
        category: CategoryArg,

        #[clap(flatten)]
        fields: AppFields,
    },

    /// Delete the app at an index
    Delete {
        /// Catalog index of the app
        index: usize,
    },

    /// List apps, all or filtered to one category
    List {
        /// Only list apps of this category
        #[clap(long, value_enum, conflicts_with = "summary")]
        category: Option<CategoryArg>,

        /// One summary line per app
        #[clap(long)]
        summary: bool,
    },

    /// Search apps by name, developer, or minimum star rating
    #[clap(group(ArgGroup::new("criteria").required(true)))]
    Search {
        /// Case-insensitive name substring
        #[clap(long, group = "criteria")]
        name: Option<String>,

        /// Registered developer name
        #[clap(long, group = "criteria")]
        developer: Option<String>,

        /// Lowest acceptable average star rating
        #[clap(long, group = "criteria")]
        min_rating: Option<u32>,
    },

    /// List recommended apps, all or filtered to one category
    Recommended {
        /// Only consider apps of this category
        #[clap(long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// Sort the catalog by app name, ascending
    Sort,

    /// Show a random app of the day
    Random,

    /// Append one simulated rating to every app
    Simulate,

    /// Tabular catalog report
    Overview {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
}

/// Table row for the overview report
#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Developer")]
    developer: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Recommended")]
    recommended: char,
}

impl AppCommand {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let apps_path = data_dir.join(APPS_FILE);
        let mut store = AppStore::load_or_default(&apps_path)?;
        let registry = DeveloperRegistry::load_or_default(&data_dir.join(DEVELOPERS_FILE))?;

        match self {
            AppCommand::Add { category, fields } => {
                let developer = registry
                    .developer_by_name(&fields.developer)
                    .with_context(|| {
                        format!(
                            "No developer named '{}' is registered; register one with 'storefront dev add'",
                            fields.developer
                        )
                    })?;

                let app = match category {
                    CategoryArg::Education => App::education(
                        developer,
                        &fields.name,
                        fields.size,
                        fields.version,
                        fields.cost,
                        fields.level.unwrap_or(0),
                    ),
                    CategoryArg::Game => App::game(
                        developer,
                        &fields.name,
                        fields.size,
                        fields.version,
                        fields.cost,
                        fields.multiplayer,
                    ),
                    CategoryArg::Productivity => App::productivity(
                        developer,
                        &fields.name,
                        fields.size,
                        fields.version,
                        fields.cost,
                    ),
                };

                store.add_app(app);
                store.save_to_path(&apps_path)?;
                println!(
                    "{} App '{}' registered successfully.",
                    Category::from(category),
                    fields.name
                );
            }

            AppCommand::Update {
                index,
                category,
                fields,
            } => {
                let developer = registry
                    .developer_by_name(&fields.developer)
                    .with_context(|| {
                        format!("No developer named '{}' is registered", fields.developer)
                    })?;

                let updated = match category {
                    CategoryArg::Education => store.update_education_app(
                        index,
                        developer,
                        &fields.name,
                        fields.size,
                        fields.version,
                        fields.cost,
                        fields.level.unwrap_or(0),
                    ),
                    CategoryArg::Game => store.update_game_app(
                        index,
                        developer,
                        &fields.name,
                        fields.size,
                        fields.version,
                        fields.cost,
                        fields.multiplayer,
                    ),
                    CategoryArg::Productivity => store.update_productivity_app(
                        index,
                        developer,
                        &fields.name,
                        fields.size,
                        fields.version,
                        fields.cost,
                    ),
                };

                if updated {
                    store.save_to_path(&apps_path)?;
                    println!("App Updated Successfully");
                } else {
                    println!("No App Updated");
                }
            }

            AppCommand::Delete { index } => match store.delete_app_by_index(index) {
                Some(deleted) => {
                    store.save_to_path(&apps_path)?;
                    println!("Deleted: {}", deleted.summary());
                }
                None => println!("There is no app at this index."),
            },

            AppCommand::List { category, summary } => {
                let listing = if summary {
                    store.list_summary_of_all_apps()
                } else {
                    match category {
                        Some(category) => store.list_apps_by_category(category.into()),
                        None => store.list_all_apps(),
                    }
                };
                println!("{listing}");
            }

            AppCommand::Search {
                name,
                developer,
                min_rating,
            } => {
                let listing = if let Some(name) = name {
                    store.list_apps_by_name(&name)
                } else if let Some(developer_name) = developer {
                    match registry.developer_by_name(&developer_name) {
                        Some(developer) => store.list_apps_by_developer(&developer.value()),
                        None => "Developer not registered yet.".to_string(),
                    }
                } else if let Some(rating) = min_rating {
                    store.list_apps_above_or_equal_rating(rating)
                } else {
                    anyhow::bail!("one of --name, --developer, --min-rating is required");
                };
                println!("{listing}");
            }

            AppCommand::Recommended { category } => {
                let listing = match category {
                    Some(category) => store.list_recommended_apps_by_category(category.into()),
                    None => store.list_recommended_apps(),
                };
                println!("{listing}");
            }

            AppCommand::Sort => {
                store.sort_apps_by_name_ascending();
                store.save_to_path(&apps_path)?;
                println!("New list of apps:\n{}", store.list_all_apps());
            }

            AppCommand::Random => {
                let app = store.random_app(&mut rand::thread_rng())?;
                println!("Random App of the day:\n{}", app.summary());
            }

            AppCommand::Simulate => {
                store.simulate_ratings(&mut rand::thread_rng());
                store.save_to_path(&apps_path)?;
                println!("Simulated one rating for every app.");
                println!("{}", store.list_summary_of_all_apps());
            }

            AppCommand::Overview { json } => print_overview(&store, json)?,
        }

        Ok(())
    }
}

fn print_overview(store: &AppStore, json: bool) -> Result<()> {
    if json {
        let apps: Vec<serde_json::Value> = store
            .apps()
            .iter()
            .enumerate()
            .map(|(index, app)| {
                serde_json::json!({
                    "index": index,
                    "name": app.name(),
                    "category": app.category().label(),
                    "developer": app.developer().name(),
                    "version": app.version(),
                    "cost": app.cost(),
                    "rating": app.average_rating(),
                    "recommended": app.is_recommended(),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&apps)?);
        return Ok(());
    }

    if store.number_of_apps() == 0 {
        println!("No apps added yet");
        return Ok(());
    }

    let rows: Vec<OverviewRow> = store
        .apps()
        .iter()
        .enumerate()
        .map(|(index, app)| OverviewRow {
            index,
            name: validation::truncate_string(app.name(), 30).to_string(),
            category: app.category().label(),
            developer: app.developer().name(),
            version: app.version().to_string(),
            cost: format!("€{:.2}", app.cost()),
            rating: format!("{:.2}", app.average_rating()),
            recommended: validation::bool_to_yn(app.is_recommended()),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
    Ok(())
}
