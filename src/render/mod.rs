//! Rendering backends that turn markup and stylesheets into PDF files.

mod chrome;

pub use chrome::ChromeRenderer;

use crate::error::Result;
use crate::stylesheet::StylesheetList;
use std::path::Path;

/// A PDF rendering engine.
///
/// Implementations must apply `stylesheets` in order, later entries taking
/// precedence, and honor `@page` rules including margin boxes.
pub trait Renderer {
    /// Render `markup` styled with `stylesheets` into a PDF at `output`.
    fn render(&self, markup: &str, stylesheets: &StylesheetList, output: &Path) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, markup: &str, stylesheets: &StylesheetList, output: &Path) -> Result<()> {
        (**self).render(markup, stylesheets, output)
    }
}
