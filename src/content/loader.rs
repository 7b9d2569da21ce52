//! Content loader - reads raw documents from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentCollection;
use crate::config::CollectionConfig;
use crate::Folio;

/// Errors raised while reading content from disk
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}

/// Loads collections from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load a configured collection by name
    pub fn load(&self, name: &str) -> Result<ContentCollection, ContentError> {
        let collection = self
            .folio
            .config
            .collection(name)
            .ok_or_else(|| ContentError::UnknownCollection(name.to_string()))?;
        self.load_collection(collection)
    }

    /// Load one collection directory into a sorted collection
    pub fn load_collection(
        &self,
        collection: &CollectionConfig,
    ) -> Result<ContentCollection, ContentError> {
        let dir = self.folio.content_dir.join(&collection.dir);
        let extensions = self.folio.config.extensions.as_slice();

        let resources = read_resources(&dir, extensions)?;
        tracing::debug!(
            "Read {} documents for collection {:?} from {:?}",
            resources.len(),
            collection.name,
            dir
        );

        Ok(ContentCollection::load_with_extensions(resources, extensions))
    }
}

/// Read every recognized document under `dir`, ordered by path
///
/// A missing directory yields no resources. Files and subdirectories that
/// cannot be read, including broken symlinks, are skipped with a warning.
pub fn read_resources<E: AsRef<str>>(
    dir: &Path,
    extensions: &[E],
) -> Result<Vec<(String, String)>, ContentError> {
    if !dir.exists() {
        tracing::debug!("Content directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut resources = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself could not be walked
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !has_extension(path, extensions) {
            continue;
        }

        match read_document(path) {
            Ok(raw) => {
                let key = path
                    .strip_prefix(dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .to_string();
                resources.push((key, raw));
            }
            Err(e) => {
                tracing::warn!("Skipping document: {}", e);
            }
        }
    }

    Ok(resources)
}

fn read_document(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if a file has one of the recognized extensions
fn has_extension<E: AsRef<str>>(path: &Path, extensions: &[E]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|e| e.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
