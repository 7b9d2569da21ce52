//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

/// Default `_config.yml` written by `init`
const CONFIG_TEMPLATE: &str = r#"# Site
title: Portfolio
description: ''
author: John Doe
language: en

# URL
url: http://example.com

# Directory
content_dir: content
public_dir: public

# Content
collections:
  - name: posts
    dir: posts
  - name: resources
    dir: resources
extensions: [md, markdown, mdx]

# Date format
date_format: YYYY-MM-DD

# Rendering
highlight:
  theme: base16-ocean.dark
  line_number: true

# Server
server:
  ip: localhost
  port: 4000
"#;

const WELCOME_POST: &str = r#"---
title: "Hello World"
date: "2024-01-01"
excerpt: "The first post on this site."
category: "General"
author: "John Doe"
tags: ["Welcome"]
---

Welcome! This post was created by `folio init`. Edit or delete it, then run
`folio list` to see your collection.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir)?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    // Directories come from the template so they match what gets loaded
    let config = SiteConfig::load(&config_path)?;
    let content_dir = target_dir.join(&config.content_dir);
    for collection in &config.collections {
        fs::create_dir_all(content_dir.join(&collection.dir))?;
    }

    if let Some(posts) = config.collection("posts") {
        fs::write(content_dir.join(&posts.dir).join("hello-world.md"), WELCOME_POST)?;
    }

    tracing::debug!("Wrote {:?}", config_path);

    Ok(())
}
