//! HTML to PDF conversion pipeline.
//!
//! A conversion runs in two phases. [`Converter::prepare`] reads and parses
//! the document, anchors image references at its directory and assembles the
//! stylesheet list. Local stylesheet links are dropped from the markup, as
//! their content travels in that list. [`Converter::convert`] then hands the
//! result to a [`Renderer`].
//!
//! # Example
//!
//! ```no_run
//! use htmlpdf::{ConversionOptions, Converter};
//!
//! fn main() -> htmlpdf::Result<()> {
//!     let options = ConversionOptions::new()
//!         .with_output("report.pdf")
//!         .with_page_size("Letter");
//!     let conversion = Converter::new().convert("report.html", &options)?;
//!     println!("{}", conversion.output.display());
//!     Ok(())
//! }
//! ```

use crate::document::Document;
use crate::error::{Error, Result};
use crate::options::ConversionOptions;
use crate::page::PageRules;
use crate::paths::{containing_dir, normalize_image_sources};
use crate::render::{ChromeRenderer, Renderer};
use crate::stylesheet::{
    collect_stylesheets, strip_local_stylesheet_links, Stylesheet, StylesheetList, StylesheetOrigin,
};
use crate::warning::{LogSink, WarningSink};
use std::fs;
use std::path::{Path, PathBuf};

/// A document ready to be rendered.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    /// Absolute directory containing the source document
    pub base_dir: PathBuf,

    /// Serialized markup with rewritten image references
    pub markup: String,

    /// Stylesheets in cascade order, page rules last
    pub stylesheets: StylesheetList,

    /// Number of image references that were rewritten
    pub rewritten_images: usize,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Source HTML path as given
    pub input: PathBuf,

    /// Written PDF path
    pub output: PathBuf,

    /// Number of image references that were rewritten
    pub rewritten_images: usize,

    /// Origins of the stylesheets handed to the renderer, in cascade order
    pub stylesheets: Vec<StylesheetOrigin>,
}

/// Converts HTML files to PDF.
///
/// Generic over the rendering engine and the receiver of non-fatal warnings
/// so both can be swapped out, e.g. for tests.
#[derive(Debug, Clone)]
pub struct Converter<R = ChromeRenderer, S = LogSink> {
    renderer: R,
    sink: S,
}

impl Converter {
    /// Create a converter using headless Chrome and logging warnings.
    pub fn new() -> Self {
        Self {
            renderer: ChromeRenderer::default(),
            sink: LogSink,
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer, S: WarningSink> Converter<R, S> {
    /// Replace the rendering engine.
    pub fn with_renderer<R2: Renderer>(self, renderer: R2) -> Converter<R2, S> {
        Converter {
            renderer,
            sink: self.sink,
        }
    }

    /// Replace the warning receiver.
    pub fn with_sink<S2: WarningSink>(self, sink: S2) -> Converter<R, S2> {
        Converter {
            renderer: self.renderer,
            sink,
        }
    }

    /// Read, rewrite and style a document without rendering it.
    pub fn prepare<P: AsRef<Path>>(
        &self,
        html_path: P,
        options: &ConversionOptions,
    ) -> Result<PreparedDocument> {
        let html_path = html_path.as_ref();
        let base_dir = containing_dir(html_path)?;
        log::debug!("Preparing {} (base {})", html_path.display(), base_dir.display());

        let markup = fs::read_to_string(html_path).map_err(|source| Error::FileRead {
            path: html_path.to_path_buf(),
            source,
        })?;

        let document = Document::parse(&markup);
        let normalized = normalize_image_sources(document, &base_dir)?;

        let layers = if options.include_css {
            collect_stylesheets(&normalized.document, &base_dir, &self.sink)
        } else {
            vec![Stylesheet::default_page()]
        };
        let (document, stripped) = strip_local_stylesheet_links(normalized.document);
        log::debug!("Removed {} local stylesheet link(s) from the markup", stripped);
        let stylesheets = StylesheetList::new(layers, &PageRules::from(options));
        log::debug!(
            "Stylesheets: {}",
            stylesheets
                .iter()
                .map(|s| s.origin().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(PreparedDocument {
            markup: document.to_html()?,
            base_dir,
            stylesheets,
            rewritten_images: normalized.rewritten,
        })
    }

    /// Convert `html_path` to the PDF named in `options`.
    pub fn convert<P: AsRef<Path>>(
        &self,
        html_path: P,
        options: &ConversionOptions,
    ) -> Result<Conversion> {
        let html_path = html_path.as_ref();
        let prepared = self.prepare(html_path, options)?;

        self.renderer
            .render(&prepared.markup, &prepared.stylesheets, &options.output)?;

        Ok(Conversion {
            input: html_path.to_path_buf(),
            output: options.output.clone(),
            rewritten_images: prepared.rewritten_images,
            stylesheets: prepared.stylesheets.origins(),
        })
    }
}
