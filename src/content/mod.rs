//! Content module - front-matter parsing, entries and collections

pub mod cache;
pub mod collection;
pub mod date;
mod entry;
mod frontmatter;
pub mod loader;
mod markdown;

pub use cache::CollectionCache;
pub use collection::ContentCollection;
pub use entry::{parse_list, Entry, EntrySummary};
pub use frontmatter::FrontMatter;
pub use loader::{ContentError, ContentLoader};
pub use markdown::{Heading, MarkdownRenderer, Rendered};
