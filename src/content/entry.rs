//! Entry models

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::FrontMatter;

/// Reading speed used to estimate `readTime` when the header has none
const WORDS_PER_MINUTE: usize = 200;

/// Longest derived excerpt, in characters
const EXCERPT_LENGTH: usize = 160;

lazy_static! {
    static ref MARKDOWN_LINK: Regex = Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref MARKDOWN_MARKUP: Regex = Regex::new(r"[*_`~>]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One parsed document in a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Slug derived from the file name
    pub identifier: String,

    /// Header key-value pairs
    pub metadata: FrontMatter,

    /// Markdown after the header block
    pub body: String,
}

/// Listing view of an entry: everything except the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntrySummary<'a> {
    pub identifier: &'a str,
    pub metadata: &'a FrontMatter,
}

impl Entry {
    pub fn new(identifier: String, metadata: FrontMatter, body: String) -> Self {
        Self {
            identifier,
            metadata,
            body,
        }
    }

    pub fn summary(&self) -> EntrySummary<'_> {
        EntrySummary {
            identifier: &self.identifier,
            metadata: &self.metadata,
        }
    }

    /// Title from the header, falling back to the identifier
    pub fn title(&self) -> &str {
        self.metadata.title().unwrap_or(&self.identifier)
    }

    pub fn date(&self) -> Option<&str> {
        self.metadata.date()
    }

    /// Sort key; `None` when the date is missing or unparsable
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.metadata.parse_date()
    }

    pub fn category(&self) -> Option<&str> {
        self.metadata.get("category")
    }

    pub fn author(&self) -> Option<&str> {
        self.metadata.get("author")
    }

    pub fn image(&self) -> Option<&str> {
        self.metadata.get("image")
    }

    /// Tags as a list.
    ///
    /// Accepts a bracketed literal (`["A", "B"]` or `['A', 'B']`) as well as
    /// a bare comma separated value.
    pub fn tags(&self) -> Vec<String> {
        self.metadata.get("tags").map(parse_list).unwrap_or_default()
    }

    /// Excerpt from the header, or the first paragraph of the body as plain text
    pub fn excerpt(&self) -> String {
        match self.metadata.get("excerpt") {
            Some(excerpt) => excerpt.to_string(),
            None => derive_excerpt(&self.body),
        }
    }

    /// `readTime` from the header, or an estimate from the body word count
    pub fn read_time(&self) -> String {
        match self.metadata.get("readTime") {
            Some(read_time) => read_time.to_string(),
            None => {
                let words = self.body.split_whitespace().count();
                let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
                format!("{} min read", minutes)
            }
        }
    }
}

/// Interpret a raw metadata value as a list of strings
pub fn parse_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();

    let inner = match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(inner) => {
            if let Ok(items) = serde_json::from_str::<Vec<String>>(raw) {
                return items;
            }
            inner
        }
        None => raw,
    };

    inner
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn derive_excerpt(body: &str) -> String {
    let paragraph = body
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty() && !p.starts_with('#') && !p.starts_with("```"))
        .unwrap_or_default();

    let text = MARKDOWN_LINK.replace_all(paragraph, "$1");
    let text = MARKDOWN_MARKUP.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    if text.chars().count() <= EXCERPT_LENGTH {
        return text.to_string();
    }

    let cut: String = text.chars().take(EXCERPT_LENGTH).collect();
    // Avoid ending mid-word
    let cut = match cut.rfind(' ') {
        Some(pos) => &cut[..pos],
        None => &cut[..],
    };
    format!("{}...", cut.trim_end())
}
