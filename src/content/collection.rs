//! Sorted, read-only collections of parsed entries

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use super::{Entry, EntrySummary, FrontMatter};

/// Extensions stripped from file names when deriving identifiers
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// An immutable set of entries, newest first
///
/// Built once from raw `(path, text)` pairs; there is no way to add, remove
/// or change entries afterwards.
#[derive(Debug, Clone, Default)]
pub struct ContentCollection {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ContentCollection {
    /// Build a collection from `(path, raw_text)` pairs
    pub fn load<I, P, T>(resources: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: AsRef<str>,
    {
        Self::load_with_extensions(resources, DEFAULT_EXTENSIONS)
    }

    /// Build a collection, stripping only the given extensions from identifiers
    ///
    /// When two paths map to the same identifier the later one wins.
    pub fn load_with_extensions<I, P, T, E>(resources: I, extensions: &[E]) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: AsRef<str>,
        E: AsRef<str>,
    {
        let mut by_id: HashMap<String, Entry> = HashMap::new();

        for (path, raw) in resources {
            let path = path.as_ref();
            let identifier = derive_identifier(path, extensions);
            let (metadata, body) = FrontMatter::parse(raw.as_ref());

            let entry = Entry::new(identifier.clone(), metadata, body.to_string());
            if by_id.insert(identifier, entry).is_some() {
                tracing::warn!("Duplicate entry identifier from {:?}, keeping the latest", path);
            }
        }

        let mut entries: Vec<Entry> = by_id.into_values().collect();
        // Same order as `compare_entries`, with each date parsed once
        entries.sort_by_cached_key(|e| (Reverse(e.parsed_date()), e.identifier.clone()));

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.identifier.clone(), i))
            .collect();

        tracing::debug!("Built collection with {} entries", entries.len());

        Self { entries, index }
    }

    /// Every entry without its body, in sort order
    pub fn list_all(&self) -> Vec<EntrySummary<'_>> {
        self.entries.iter().map(Entry::summary).collect()
    }

    /// Look up one entry, body included
    pub fn get(&self, identifier: &str) -> Option<&Entry> {
        self.index.get(identifier).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Entries whose `category` matches, case-insensitively
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| {
            e.category()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        })
    }

    /// Entries carrying the given tag, case-insensitively
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.tags().iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Category names with entry counts, most used first
    pub fn categories(&self) -> Vec<(String, usize)> {
        count_names(self.entries.iter().filter_map(|e| e.category().map(str::to_string)))
    }

    /// Tag names with entry counts, most used first
    pub fn tags(&self) -> Vec<(String, usize)> {
        count_names(self.entries.iter().flat_map(|e| e.tags()))
    }

    /// The entries just newer and just older than `identifier`
    pub fn neighbors(&self, identifier: &str) -> (Option<&Entry>, Option<&Entry>) {
        let Some(&pos) = self.index.get(identifier) else {
            return (None, None);
        };
        let newer = pos.checked_sub(1).map(|i| &self.entries[i]);
        let older = self.entries.get(pos + 1);
        (newer, older)
    }
}

impl<'a> IntoIterator for &'a ContentCollection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Final path segment with a recognized extension removed
///
/// `./posts/my-post.md` becomes `my-post`; `notes.txt` stays `notes.txt`
/// unless `txt` is in `extensions`.
pub fn derive_identifier<E: AsRef<str>>(path: &str, extensions: &[E]) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);

    if let Some((stem, ext)) = file_name.rsplit_once('.') {
        let recognized = extensions
            .iter()
            .any(|e| e.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext));
        if recognized && !stem.is_empty() {
            return stem.to_string();
        }
    }

    file_name.to_string()
}

/// Total order used for the collection: dated entries newest first, then
/// undated ones, each group ordered by identifier
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.parsed_date()
        .cmp(&a.parsed_date())
        .then_with(|| a.identifier.cmp(&b.identifier))
}

fn count_names(names: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(date: Option<&str>, title: &str) -> String {
        match date {
            Some(date) => format!("---\ntitle: \"{}\"\ndate: \"{}\"\n---\n{} body\n", title, date, title),
            None => format!("---\ntitle: {}\n---\n{} body\n", title, title),
        }
    }

    fn ids(collection: &ContentCollection) -> Vec<&str> {
        collection.list_all().iter().map(|s| s.identifier).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let collection = ContentCollection::load([
            ("./posts/a.md", post(Some("2024-01-01"), "A")),
            ("./posts/b.md", post(Some("2025-06-01"), "B")),
            ("./posts/c.md", post(Some("2023-03-01"), "C")),
        ]);

        let dates: Vec<_> = collection
            .list_all()
            .iter()
            .map(|s| s.metadata.date().unwrap())
            .collect();
        assert_eq!(dates, vec!["2025-06-01", "2024-01-01", "2023-03-01"]);
    }

    #[test]
    fn test_get_includes_body() {
        let collection = ContentCollection::load([("posts/hello.md", post(Some("2024-01-01"), "Hello"))]);

        let entry = collection.get("hello").unwrap();
        assert_eq!(entry.title(), "Hello");
        assert_eq!(entry.body, "Hello body\n");

        let summary = serde_json::to_value(collection.list_all()[0]).unwrap();
        assert!(summary.get("body").is_none());
        assert_eq!(summary["identifier"], "hello");
    }

    #[test]
    fn test_unknown_identifier() {
        let collection = ContentCollection::load([("a.md", post(None, "A"))]);
        assert!(collection.get("does-not-exist").is_none());
    }

    #[test]
    fn test_undated_entries_sort_last_and_stable() {
        let resources = vec![
            ("zeta.md", post(None, "Z")),
            ("old.md", post(Some("1999-01-01"), "Old")),
            ("alpha.md", post(Some("garbage"), "A")),
            ("new.md", post(Some("2024-02-02"), "New")),
        ];

        let forward = ContentCollection::load(resources.clone());
        let backward = ContentCollection::load(resources.into_iter().rev());

        assert_eq!(ids(&forward), vec!["new", "old", "alpha", "zeta"]);
        assert_eq!(ids(&forward), ids(&backward));
    }

    #[test]
    fn test_equal_dates_break_ties_by_identifier() {
        let collection = ContentCollection::load([
            ("b.md", post(Some("2024-01-01"), "B")),
            ("a.md", post(Some("2024-01-01"), "A")),
        ]);
        assert_eq!(ids(&collection), vec!["a", "b"]);
    }

    #[test]
    fn test_order_matches_comparator() {
        let collection = ContentCollection::load([
            ("x.md", post(Some("2024-01-01"), "X")),
            ("y.md", post(None, "Y")),
            ("z.md", post(Some("2024-01-02 08:00"), "Z")),
        ]);
        let entries: Vec<_> = collection.iter().collect();
        for pair in entries.windows(2) {
            assert_eq!(compare_entries(pair[0], pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_duplicate_identifier_last_wins() {
        let collection = ContentCollection::load([
            ("posts/dup.md", post(Some("2024-01-01"), "First")),
            ("drafts/dup.markdown", post(Some("2024-01-01"), "Second")),
        ]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("dup").unwrap().title(), "Second");
    }

    #[test]
    fn test_derive_identifier() {
        assert_eq!(derive_identifier("./posts/my-post.md", DEFAULT_EXTENSIONS), "my-post");
        assert_eq!(derive_identifier("a\\b.markdown", DEFAULT_EXTENSIONS), "b");
        assert_eq!(derive_identifier("notes.txt", DEFAULT_EXTENSIONS), "notes.txt");
        assert_eq!(derive_identifier("v1.2.md", DEFAULT_EXTENSIONS), "v1.2");
        assert_eq!(derive_identifier(".md", DEFAULT_EXTENSIONS), ".md");
        assert_eq!(derive_identifier("notes.txt", &[".txt"]), "notes");
    }

    #[test]
    fn test_entry_without_header() {
        let collection = ContentCollection::load([("plain.md", "just text")]);
        let entry = collection.get("plain").unwrap();
        assert!(entry.metadata.is_empty());
        assert_eq!(entry.body, "just text");
    }

    #[test]
    fn test_categories_tags_and_filters() {
        let collection = ContentCollection::load([
            ("a.md", "---\ndate: 2024-01-03\ncategory: AI\ntags: [\"LLM\", \"Rust\"]\n---\n"),
            ("b.md", "---\ndate: 2024-01-02\ncategory: ai\ntags: [\"Rust\"]\n---\n"),
            ("c.md", "---\ndate: 2024-01-01\ncategory: Career\n---\n"),
        ]);

        assert_eq!(collection.by_category("AI").count(), 2);
        assert_eq!(collection.by_tag("rust").count(), 2);
        assert_eq!(
            collection.tags(),
            vec![("Rust".to_string(), 2), ("LLM".to_string(), 1)]
        );
        assert_eq!(collection.categories().len(), 3);
    }

    #[test]
    fn test_neighbors() {
        let collection = ContentCollection::load([
            ("a.md", post(Some("2024-01-01"), "A")),
            ("b.md", post(Some("2024-02-01"), "B")),
            ("c.md", post(Some("2024-03-01"), "C")),
        ]);

        let (newer, older) = collection.neighbors("b");
        assert_eq!(newer.unwrap().identifier, "c");
        assert_eq!(older.unwrap().identifier, "a");

        let (newer, older) = collection.neighbors("c");
        assert!(newer.is_none());
        assert_eq!(older.unwrap().identifier, "b");

        assert_eq!(collection.neighbors("missing"), (None, None));
    }
}
