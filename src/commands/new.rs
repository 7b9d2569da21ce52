//! Create a new entry

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Optional header values for a new entry
#[derive(Debug, Default, Clone)]
pub struct NewEntry<'a> {
    pub author: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Create a scaffolded document in a collection; returns its path
pub fn create_entry(
    folio: &Folio,
    collection: &str,
    title: &str,
    options: &NewEntry<'_>,
) -> Result<PathBuf> {
    let Some(config) = folio.config.collection(collection) else {
        anyhow::bail!(
            "Unknown collection: {}. Available: {}",
            collection,
            folio.config.collection_names().join(", ")
        );
    };

    let target_dir = folio.content_dir.join(&config.dir);
    fs::create_dir_all(&target_dir)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }
    let file_path = target_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = scaffold(
        title,
        &now.format("%Y-%m-%d").to_string(),
        &slug,
        options.author.unwrap_or(&folio.config.author),
        options.category.unwrap_or("General"),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Default document skeleton
fn scaffold(title: &str, date: &str, slug: &str, author: &str, category: &str) -> String {
    format!(
        r#"---
title: "{title}"
date: "{date}"
slug: "{slug}"
author: "{author}"
category: "{category}"
excerpt: ""
tags: []
---

"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_entry() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let options = NewEntry {
            author: Some("Ada"),
            category: None,
        };
        let path = create_entry(&folio, "posts", "Hello, Agents!", &options).unwrap();
        assert!(path.ends_with("posts/hello-agents.md"));

        let raw = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&raw);
        assert_eq!(fm.title(), Some("Hello, Agents!"));
        assert_eq!(fm.get("slug"), Some("hello-agents"));
        assert_eq!(fm.get("author"), Some("Ada"));
        assert_eq!(fm.get("category"), Some("General"));
        assert_eq!(fm.get("tags"), Some("[]"));
        assert!(fm.parse_date().is_some());
        assert_eq!(body, "\n");

        // refuses to overwrite
        assert!(create_entry(&folio, "posts", "Hello, Agents!", &options).is_err());
    }

    #[test]
    fn test_unknown_collection() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        let err = create_entry(&folio, "nope", "Title", &NewEntry::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown collection"));
    }
}
