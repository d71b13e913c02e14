//! Conversion options and configuration.

use std::path::PathBuf;

/// Default output file when none is given.
pub const DEFAULT_OUTPUT: &str = "output.pdf";

/// Default page size token.
pub const DEFAULT_PAGE_SIZE: &str = "A4";

/// Default page margin token.
pub const DEFAULT_MARGIN: &str = "1cm";

/// Options for a single HTML to PDF conversion.
///
/// Size and margin are passed through to the `@page` rule verbatim, so any
/// value the rendering engine understands is accepted (`A4`, `Letter`,
/// `210mm 297mm`, `0.5in`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Destination PDF path
    pub output: PathBuf,

    /// Page size token for the `@page` rule
    pub page_size: String,

    /// Page margin token for the `@page` rule
    pub margin: String,

    /// Whether stylesheets linked from the document are loaded
    pub include_css: bool,

    /// Whether a page counter footer is added
    pub page_numbers: bool,
}

impl ConversionOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: impl Into<String>) -> Self {
        self.page_size = size.into();
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = margin.into();
        self
    }

    /// Enable or disable loading of document stylesheets.
    pub fn with_document_css(mut self, include: bool) -> Self {
        self.include_css = include;
        self
    }

    /// Enable or disable the page number footer.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            margin: DEFAULT_MARGIN.to_string(),
            include_css: true,
            page_numbers: true,
        }
    }
}
