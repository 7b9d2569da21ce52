//! Front-matter parsing

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use super::date::parse_date_string;

/// Delimiter that opens and closes a front-matter block
const DELIMITER: &str = "---";

/// Closing marker: a newline immediately followed by the delimiter
const CLOSING_MARKER: &str = "\n---";

/// Key-value metadata from the header block of a document.
///
/// Keys and values are kept as strings exactly as written (after trimming and
/// outer-quote removal). Keys keep the position of their first occurrence,
/// values come from their last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Never fails: content without a complete header block comes back
    /// untouched with empty metadata.
    pub fn parse(content: &str) -> (Self, &str) {
        if !content.starts_with(DELIMITER) {
            return (FrontMatter::default(), content);
        }

        let rest = &content[DELIMITER.len()..];
        let Some(end_pos) = rest.find(CLOSING_MARKER) else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let header = rest[..end_pos].trim();
        let remaining = strip_blank_line(&rest[end_pos + CLOSING_MARKER.len()..]);

        (Self::parse_header(header), remaining)
    }

    /// Parse `key: value` lines. Lines without a colon are ignored.
    fn parse_header(header: &str) -> Self {
        let mut fields = IndexMap::new();

        for line in header.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());
            fields.insert(key.trim().to_string(), value.to_string());
        }

        Self { fields }
    }

    /// Look up a raw metadata value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// The raw `date` value, unparsed
    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    /// Parse the date string into a timestamp
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date().and_then(parse_date_string)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Remove a single leading blank line (optional spaces, then one newline)
fn strip_blank_line(s: &str) -> &str {
    let after_spaces = s.trim_start_matches(|c: char| c != '\n' && c.is_whitespace());
    after_spaces.strip_prefix('\n').unwrap_or(s)
}

/// Strip one matching pair of outer double or single quotes
fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        for quote in ['"', '\''] {
            if value.starts_with(quote) && value.ends_with(quote) {
                return &value[1..value.len() - 1];
            }
        }
    }
    value
}
