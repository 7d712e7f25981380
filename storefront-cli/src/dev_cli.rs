//! Developer registry CLI commands

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use storefront_core::developer::{Developer, DeveloperRegistry};
use storefront_core::validation;

/// Developer registry snapshot file name inside the data directory
pub const DEVELOPERS_FILE: &str = "developers.yaml";

#[derive(Parser, Debug)]
pub enum DevCommand {
    /// Register a new developer
    Add {
        /// Developer name (unique, ignoring case)
        name: String,

        /// Developer website URL
        website: String,
    },

    /// List registered developers
    List,

    /// Update a developer's website
    UpdateWebsite {
        /// Developer name
        name: String,

        /// New website URL
        website: String,
    },

    /// Remove a developer from the registry
    Remove {
        /// Developer name
        name: String,
    },
}

impl DevCommand {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(DEVELOPERS_FILE);
        let mut registry = DeveloperRegistry::load_or_default(&path)?;

        match self {
            DevCommand::Add { name, website } => {
                if !validation::is_valid_url(&website) {
                    anyhow::bail!("'{website}' is not a valid website URL");
                }
                if registry.add_developer(Developer::new(&name, &website)) {
                    registry.save_to_path(&path)?;
                    println!("Add successful");
                } else {
                    println!("Add not successful: a developer named '{name}' already exists");
                }
            }
            DevCommand::List => {
                println!("{}", registry.list_developers());
            }
            DevCommand::UpdateWebsite { name, website } => {
                if !validation::is_valid_url(&website) {
                    anyhow::bail!("'{website}' is not a valid website URL");
                }
                if registry.update_developer_website(&name, &website) {
                    registry.save_to_path(&path)?;
                    println!("Developer Website Updated");
                } else {
                    println!("Developer name is NOT valid");
                }
            }
            DevCommand::Remove { name } => match registry.remove_developer(&name) {
                Some(removed) => {
                    registry.save_to_path(&path)?;
                    println!("Delete successful: {removed}");
                }
                None => println!("Delete not successful"),
            },
        }

        Ok(())
    }
}
