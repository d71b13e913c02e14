//! Image reference normalization.
//!
//! The document is rendered from a temporary location, so relative image
//! references are rewritten into `file://` URLs anchored at the directory of
//! the source document.

use crate::document::Document;
use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

const NETWORK_PREFIXES: [&str; 2] = ["http://", "https://"];

/// True if `reference` points at an `http://` or `https://` resource.
pub fn is_network_reference(reference: &str) -> bool {
    NETWORK_PREFIXES
        .iter()
        .any(|prefix| reference.starts_with(prefix))
}

/// True if an image `src` value must be anchored at the document directory.
///
/// Empty values, network references and absolute paths are left alone.
pub fn is_relative_reference(reference: &str) -> bool {
    !reference.is_empty() && !is_network_reference(reference) && !reference.starts_with('/')
}

/// Absolute directory containing `path`.
///
/// The path does not have to exist; relative paths are taken against the
/// current working directory.
pub fn containing_dir(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::InvalidPath(format!("{} has no parent directory", path.display())))
}

/// `file://` URL for `reference` joined onto `base_dir`.
///
/// A `?query` or `#fragment` suffix is carried over to the URL rather than
/// being treated as part of the file name.
pub fn file_url(base_dir: &Path, reference: &str) -> Result<Url> {
    let (rest, fragment) = match reference.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (reference, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let joined = base_dir.join(path);
    let mut url = Url::from_file_path(&joined).map_err(|_| {
        Error::InvalidPath(format!("{} is not an absolute path", joined.display()))
    })?;
    url.set_query(query);
    url.set_fragment(fragment);
    Ok(url)
}

/// Result of normalizing image references.
#[derive(Debug)]
pub struct Normalized {
    /// Document with rewritten `src` attributes
    pub document: Document,
    /// Number of references that were rewritten
    pub rewritten: usize,
}

/// Rewrite relative `<img src>` values into `file://` URLs.
///
/// No existence check is made; a missing image surfaces when rendering.
pub fn normalize_image_sources(document: Document, base_dir: &Path) -> Result<Normalized> {
    let (document, rewritten) = document.map_attribute("img", "src", |src| {
        if is_relative_reference(src) {
            file_url(base_dir, src).map(|url| Some(url.to_string()))
        } else {
            Ok(None)
        }
    })?;
    log::debug!("Rewrote {} image reference(s) against {}", rewritten, base_dir.display());
    Ok(Normalized {
        document,
        rewritten,
    })
}
