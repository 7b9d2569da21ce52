//! List collection content

use anyhow::Result;

use crate::content::date::format_date;
use crate::content::ContentCollection;
use crate::Folio;

/// List a collection's entries, tags or categories
pub fn run(folio: &Folio, collection: &str, content_type: &str) -> Result<()> {
    let entries = folio.load_collection(collection)?;

    match content_type {
        "entry" | "entries" | "post" | "posts" => {
            println!("{} ({}):", collection, entries.len());
            for line in entry_lines(&entries, &folio.config.date_format) {
                println!("  {}", line);
            }
        }
        "tag" | "tags" => {
            let tags = entries.tags();
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = entries.categories();
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: entry, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// One `date - title [identifier]` line per entry, in collection order
pub fn entry_lines(collection: &ContentCollection, date_format: &str) -> Vec<String> {
    collection
        .iter()
        .map(|entry| {
            let date = entry
                .parsed_date()
                .map(|d| format_date(&d, date_format))
                .unwrap_or_else(|| "undated".to_string());
            format!("{} - {} [{}]", date, entry.title(), entry.identifier)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_lines() {
        let collection = ContentCollection::load([
            ("first.md", "---\ntitle: First\ndate: 2024-01-01\n---\n"),
            ("draft.md", "---\ntitle: Draft\n---\n"),
            ("second.md", "---\ntitle: Second\ndate: 2024-02-01\n---\n"),
        ]);

        assert_eq!(
            entry_lines(&collection, "YYYY/MM/DD"),
            vec![
                "2024/02/01 - Second [second]",
                "2024/01/01 - First [first]",
                "undated - Draft [draft]",
            ]
        );
    }
}
