//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Content
    pub collections: Vec<CollectionConfig>,
    pub extensions: Vec<String>,

    // Date format (Moment.js style)
    pub date_format: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            collections: vec![
                CollectionConfig::new("posts", "posts"),
                CollectionConfig::new("resources", "resources"),
            ],
            extensions: vec!["md".to_string(), "markdown".to_string(), "mdx".to_string()],

            date_format: "YYYY-MM-DD".to_string(),

            highlight: HighlightConfig::default(),
            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Find a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Names of all configured collections, in config order
    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }
}

/// One named set of documents under the content directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    /// Directory relative to `content_dir`
    pub dir: String,
}

impl CollectionConfig {
    pub fn new(name: &str, dir: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Read API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.collection_names(), vec!["posts", "resources"]);
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
collections:
  - name: posts
    dir: blog
  - name: courses
    dir: catalog/courses
server:
  port: 8080
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.collection("posts").unwrap().dir, "blog");
        assert_eq!(config.collection("courses").unwrap().dir, "catalog/courses");
        assert!(config.collection("resources").is_none());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.extensions, vec!["md", "markdown", "mdx"]);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "title: From Disk\nextensions: [md]\n").unwrap();
        let config = SiteConfig::load(tmp.path()).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.extensions, vec!["md"]);
    }
}
