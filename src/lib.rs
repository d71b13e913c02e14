//! # htmlpdf
//!
//! Convert a local HTML document, together with its images and linked
//! stylesheets, into a PDF file.
//!
//! Parsing is done by html5ever and rendering by a headless Chrome instance;
//! this crate prepares the document for them. Relative image references are
//! anchored at the document's directory, linked stylesheets are loaded from
//! disk, and page rules for size, margin and page numbers are layered on top.
//!
//! ## Quick Start
//!
//! ```no_run
//! use htmlpdf::{convert_file_with_options, ConversionOptions};
//!
//! fn main() -> htmlpdf::Result<()> {
//!     let options = ConversionOptions::new()
//!         .with_output("report.pdf")
//!         .with_page_size("Letter")
//!         .with_margin("2cm")
//!         .with_page_numbers(false);
//!     convert_file_with_options("report.html", &options)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Stylesheet order
//!
//! Stylesheets are applied in this order, later entries winning:
//!
//! 1. Files linked with `<link rel="stylesheet">`, in document order
//! 2. A default page layer (A4, 1cm margin, page counter footer)
//! 3. The page rules built from [`ConversionOptions`]

pub mod convert;
pub mod document;
pub mod error;
pub mod options;
pub mod page;
pub mod paths;
pub mod render;
pub mod stylesheet;
pub mod warning;

// Re-export commonly used types
pub use convert::{Conversion, Converter, PreparedDocument};
pub use document::Document;
pub use error::{Error, Result};
pub use options::{ConversionOptions, DEFAULT_MARGIN, DEFAULT_OUTPUT, DEFAULT_PAGE_SIZE};
pub use page::PageRules;
pub use render::{ChromeRenderer, Renderer};
pub use stylesheet::{Stylesheet, StylesheetList, StylesheetOrigin, StylesheetWarning};
pub use warning::{CollectingSink, LogSink, WarningSink};

use std::path::Path;

/// Convert an HTML file to PDF with default options.
///
/// # Arguments
///
/// * `html_path` - Path to the HTML file
/// * `output` - Path of the PDF to write
///
/// # Example
///
/// ```no_run
/// use htmlpdf::convert_file;
///
/// convert_file("index.html", "index.pdf").unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(html_path: P, output: Q) -> Result<Conversion> {
    let options = ConversionOptions::new().with_output(output.as_ref());
    convert_file_with_options(html_path, &options)
}

/// Convert an HTML file to PDF with custom options.
///
/// Uses headless Chrome for rendering and reports stylesheet warnings
/// through the `log` facade.
pub fn convert_file_with_options<P: AsRef<Path>>(
    html_path: P,
    options: &ConversionOptions,
) -> Result<Conversion> {
    Converter::new().convert(html_path, options)
}
