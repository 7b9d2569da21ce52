//! Export collections as static JSON

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{ContentCollection, Entry, EntrySummary, Heading, MarkdownRenderer};
use crate::Folio;

/// Full entry as exported for detail views
#[derive(Debug, Serialize)]
pub struct EntryDocument<'a> {
    #[serde(flatten)]
    pub entry: &'a Entry,
    pub html: String,
    pub headings: Vec<Heading>,
    pub excerpt: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
    pub newer: Option<EntrySummary<'a>>,
    pub older: Option<EntrySummary<'a>>,
}

impl<'a> EntryDocument<'a> {
    pub fn new(collection: &'a ContentCollection, entry: &'a Entry, renderer: &MarkdownRenderer) -> Self {
        let rendered = renderer.render_with_outline(&entry.body);
        let (newer, older) = collection.neighbors(&entry.identifier);

        Self {
            entry,
            html: rendered.html,
            headings: rendered.headings,
            excerpt: entry.excerpt(),
            read_time: entry.read_time(),
            newer: newer.map(Entry::summary),
            older: older.map(Entry::summary),
        }
    }
}

/// Write `api/<collection>.json` and `api/<collection>/<id>.json` for every
/// configured collection
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();
    let renderer = MarkdownRenderer::from_config(&folio.config.highlight);
    let api_dir = folio.public_dir.join("api");

    fs::create_dir_all(&api_dir)?;

    let names = folio.config.collection_names();
    write_json(&api_dir.join("collections.json"), &names)?;

    let mut total = 0;
    for name in names {
        let collection = folio.load_collection(name)?;
        export_collection(&api_dir, name, &collection, &renderer)?;
        tracing::info!("Exported {} entries from {}", collection.len(), name);
        total += collection.len();
    }

    let duration = start.elapsed();
    tracing::info!("Generated {} entries in {:.2}s", total, duration.as_secs_f64());

    Ok(())
}

/// Write one collection's listing and detail documents
pub fn export_collection(
    api_dir: &Path,
    name: &str,
    collection: &ContentCollection,
    renderer: &MarkdownRenderer,
) -> Result<()> {
    write_json(&api_dir.join(format!("{}.json", name)), &collection.list_all())?;

    // Documents of deleted entries must not linger
    let entry_dir = api_dir.join(name);
    if entry_dir.exists() {
        fs::remove_dir_all(&entry_dir)?;
    }
    fs::create_dir_all(&entry_dir)?;

    for entry in collection {
        let document = EntryDocument::new(collection, entry, renderer);
        write_json(&entry_dir.join(format!("{}.json", entry.identifier)), &document)?;
    }

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
