//! Stylesheet collection.
//!
//! Stylesheets are handed to the renderer as an ordered list of CSS text.
//! Later entries win when rules conflict, so the list is always laid out as
//! document stylesheets, then the default page layer, then the caller's page
//! rules.

use crate::document::Document;
use crate::page::PageRules;
use crate::paths::is_network_reference;
use crate::warning::WarningSink;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback page metrics applied beneath the caller's page rules.
pub const DEFAULT_PAGE_CSS: &str = "
    @page {
        size: A4;
        margin: 1cm;
        @top-center {
            content: '';
        }
        @bottom-center {
            content: counter(page);
        }
    }
";

/// Where a stylesheet's content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetOrigin {
    /// A file linked from the document
    Document(PathBuf),
    /// The built-in default page layer
    DefaultPage,
    /// Page rules composed from conversion options
    PageRules,
}

impl fmt::Display for StylesheetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylesheetOrigin::Document(path) => write!(f, "{}", path.display()),
            StylesheetOrigin::DefaultPage => write!(f, "<default page>"),
            StylesheetOrigin::PageRules => write!(f, "<page rules>"),
        }
    }
}

/// CSS text with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    origin: StylesheetOrigin,
    content: String,
}

impl Stylesheet {
    /// Stylesheet loaded from a document-linked file.
    pub fn from_file(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            origin: StylesheetOrigin::Document(path.into()),
            content: content.into(),
        }
    }

    /// The built-in default page layer.
    pub fn default_page() -> Self {
        Self {
            origin: StylesheetOrigin::DefaultPage,
            content: DEFAULT_PAGE_CSS.to_string(),
        }
    }

    /// Composed page rules.
    pub fn page_rules(rules: &PageRules) -> Self {
        Self {
            origin: StylesheetOrigin::PageRules,
            content: rules.to_css(),
        }
    }

    /// Where the content came from.
    pub fn origin(&self) -> &StylesheetOrigin {
        &self.origin
    }

    /// CSS text.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered stylesheets for one conversion, ending with the page rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetList {
    sheets: Vec<Stylesheet>,
}

impl StylesheetList {
    /// Build the final list: `layers` in order, then `rules` last.
    pub fn new(layers: Vec<Stylesheet>, rules: &PageRules) -> Self {
        let mut sheets = layers;
        sheets.push(Stylesheet::page_rules(rules));
        Self { sheets }
    }

    /// Iterate in cascade order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stylesheet> {
        self.sheets.iter()
    }

    /// Number of stylesheets, page rules included.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Always false; the page rules are always present.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// The highest-priority stylesheet.
    pub fn last(&self) -> Option<&Stylesheet> {
        self.sheets.last()
    }

    /// Origins in cascade order.
    pub fn origins(&self) -> Vec<StylesheetOrigin> {
        self.sheets.iter().map(|s| s.origin.clone()).collect()
    }

    /// CSS texts in cascade order.
    pub fn contents(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.content.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a StylesheetList {
    type Item = &'a Stylesheet;
    type IntoIter = std::slice::Iter<'a, Stylesheet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}

/// A stylesheet that was referenced but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetWarning {
    /// The resolved path does not exist
    NotFound(PathBuf),
    /// The file exists but could not be read as text
    Unreadable {
        /// Resolved path
        path: PathBuf,
        /// Read failure
        message: String,
    },
}

impl fmt::Display for StylesheetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylesheetWarning::NotFound(path) => {
                write!(f, "CSS file not found: {}", path.display())
            }
            StylesheetWarning::Unreadable { path, message } => {
                write!(f, "Could not load CSS file {}: {}", path.display(), message)
            }
        }
    }
}

/// True if a `rel` attribute declares a stylesheet.
///
/// Only the first token counts, compared case-insensitively.
pub fn is_stylesheet_rel(rel: &str) -> bool {
    rel.split_whitespace()
        .next()
        .is_some_and(|token| token.eq_ignore_ascii_case("stylesheet"))
}

/// Local stylesheet files linked from `document`, in document order.
///
/// Network references are skipped. References that do not exist on disk are
/// reported to `sink` and left out.
pub fn find_stylesheets(document: &Document, base_dir: &Path, sink: &dyn WarningSink) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for link in document.find_elements("link") {
        let is_stylesheet = link.attr("rel").is_some_and(|rel| is_stylesheet_rel(&rel));
        let href = match link.attr("href") {
            Some(href) if is_stylesheet && !href.is_empty() => href,
            _ => continue,
        };
        if is_network_reference(&href) {
            continue;
        }

        let path = base_dir.join(&href);
        if path.exists() {
            paths.push(path);
        } else {
            sink.warn(&StylesheetWarning::NotFound(path).to_string());
        }
    }
    paths
}

/// Read stylesheet files and append the default page layer.
///
/// Unreadable files are reported to `sink` and skipped.
pub fn load_stylesheets(paths: &[PathBuf], sink: &dyn WarningSink) -> Vec<Stylesheet> {
    let mut sheets = Vec::with_capacity(paths.len() + 1);
    for path in paths {
        match fs::read_to_string(path) {
            Ok(content) => sheets.push(Stylesheet::from_file(path.clone(), content)),
            Err(e) => sink.warn(
                &StylesheetWarning::Unreadable {
                    path: path.clone(),
                    message: e.to_string(),
                }
                .to_string(),
            ),
        }
    }
    sheets.push(Stylesheet::default_page());
    sheets
}

/// Document stylesheets followed by the default page layer.
pub fn collect_stylesheets(
    document: &Document,
    base_dir: &Path,
    sink: &dyn WarningSink,
) -> Vec<Stylesheet> {
    let paths = find_stylesheets(document, base_dir, sink);
    load_stylesheets(&paths, sink)
}

/// Remove local stylesheet `<link>` elements from `document`.
///
/// Local sheets reach the renderer only through the collected list, so the
/// links must not stay in the markup where the browser would resolve them
/// against the render location. Network links are kept.
pub fn strip_local_stylesheet_links(document: Document) -> (Document, usize) {
    document.remove_elements("link", |link| {
        link.attr("rel").is_some_and(|rel| is_stylesheet_rel(&rel))
            && !link.attr("href").is_some_and(|href| is_network_reference(&href))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::CollectingSink;

    #[test]
    fn test_is_stylesheet_rel() {
        assert!(is_stylesheet_rel("stylesheet"));
        assert!(is_stylesheet_rel("StyleSheet"));
        assert!(is_stylesheet_rel("  stylesheet  "));
        assert!(is_stylesheet_rel("stylesheet alternate"));

        assert!(!is_stylesheet_rel("alternate stylesheet"));
        assert!(!is_stylesheet_rel("icon"));
        assert!(!is_stylesheet_rel(""));
    }

    #[test]
    fn test_list_puts_page_rules_last() {
        let rules = PageRules::new("Letter", "2cm");
        let list = StylesheetList::new(
            vec![Stylesheet::from_file("a.css", "p {}"), Stylesheet::default_page()],
            &rules,
        );

        assert_eq!(list.len(), 3);
        assert_eq!(
            list.origins(),
            vec![
                StylesheetOrigin::Document(PathBuf::from("a.css")),
                StylesheetOrigin::DefaultPage,
                StylesheetOrigin::PageRules,
            ]
        );
        assert_eq!(list.last().map(Stylesheet::content), Some(rules.to_css().as_str()));
    }

    #[test]
    fn test_load_with_no_paths_is_default_only() {
        let sink = CollectingSink::new();
        let sheets = load_stylesheets(&[], &sink);

        assert_eq!(sheets, vec![Stylesheet::default_page()]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_default_page_css() {
        assert!(DEFAULT_PAGE_CSS.contains("size: A4;"));
        assert!(DEFAULT_PAGE_CSS.contains("margin: 1cm;"));
        assert!(DEFAULT_PAGE_CSS.contains("@top-center"));
        assert!(DEFAULT_PAGE_CSS.contains("content: counter(page);"));
    }

    #[test]
    fn test_warning_messages() {
        let missing = StylesheetWarning::NotFound(PathBuf::from("/x/style.css"));
        assert_eq!(missing.to_string(), "CSS file not found: /x/style.css");

        let unreadable = StylesheetWarning::Unreadable {
            path: PathBuf::from("/x/bad.css"),
            message: "stream did not contain valid UTF-8".into(),
        };
        assert_eq!(
            unreadable.to_string(),
            "Could not load CSS file /x/bad.css: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(StylesheetOrigin::DefaultPage.to_string(), "<default page>");
        assert_eq!(StylesheetOrigin::PageRules.to_string(), "<page rules>");
    }

    #[test]
    fn test_strip_local_stylesheet_links() {
        let doc = Document::parse(
            r#"<head>
            <link rel="stylesheet" href="style.css">
            <link rel="Stylesheet" href="/srv/site/print.css">
            <link rel="stylesheet" href="https://cdn.example.com/remote.css">
            <link rel="icon" href="favicon.ico">
            </head>"#,
        );

        let (doc, removed) = strip_local_stylesheet_links(doc);

        assert_eq!(removed, 2);
        assert_eq!(
            doc.attribute_values("link", "href"),
            vec![
                Some("https://cdn.example.com/remote.css".to_string()),
                Some("favicon.ico".to_string()),
            ]
        );
    }
}
