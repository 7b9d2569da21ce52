//! Show a single entry

use anyhow::Result;

use crate::content::{Entry, MarkdownRenderer};
use crate::Folio;

/// Print one entry's metadata and body (or rendered HTML)
pub fn run(folio: &Folio, collection: &str, identifier: &str, html: bool) -> Result<()> {
    let entries = folio.load_collection(collection)?;

    let Some(entry) = entries.get(identifier) else {
        anyhow::bail!("No entry {:?} in collection {:?}", identifier, collection);
    };

    let body = if html {
        MarkdownRenderer::from_config(&folio.config.highlight).render(&entry.body)
    } else {
        entry.body.clone()
    };

    print!("{}", format_entry(entry, &body));

    let (newer, older) = entries.neighbors(identifier);
    if let Some(newer) = newer {
        println!("\nNewer: {} [{}]", newer.title(), newer.identifier);
    }
    if let Some(older) = older {
        println!("Older: {} [{}]", older.title(), older.identifier);
    }

    Ok(())
}

/// Header block with metadata followed by the given body
fn format_entry(entry: &Entry, body: &str) -> String {
    let mut out = format!("# {} [{}]\n", entry.title(), entry.identifier);
    for (key, value) in entry.metadata.iter() {
        out.push_str(&format!("{}: {}\n", key, value));
    }
    out.push_str(&format!("read time: {}\n\n", entry.read_time()));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out
}
