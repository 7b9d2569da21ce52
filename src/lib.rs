//! folio: content engine for a portfolio and blog site
//!
//! Markdown documents with a `---` delimited header are parsed into entries
//! and grouped into sorted, read-only collections. The collections are served
//! through a CLI, a static JSON export and a small HTTP read API.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    /// Load a configured collection from disk
    pub fn load_collection(&self, name: &str) -> Result<content::ContentCollection> {
        Ok(content::ContentLoader::new(self).load(name)?)
    }

    /// Export collections as static JSON
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
