//! Headless Chrome renderer.

use super::Renderer;
use crate::error::{Error, Result};
use crate::stylesheet::StylesheetList;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

/// Renders through a headless Chrome or Chromium instance.
///
/// The markup is written to a temporary `.html` file and loaded over
/// `file://`, so the rewritten image URLs resolve from disk. Each stylesheet
/// is appended to `<head>` as a `<style>` element, in order, before printing.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    executable: Option<PathBuf>,
    sandbox: bool,
}

impl ChromeRenderer {
    /// Create a renderer that auto-detects the browser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific Chrome/Chromium executable.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Enable or disable the browser sandbox.
    ///
    /// The sandbox cannot start when running as root in most containers.
    pub fn with_sandbox(mut self, enabled: bool) -> Self {
        self.sandbox = enabled;
        self
    }

    fn launch_options(&self) -> Result<LaunchOptions<'static>> {
        LaunchOptions::default_builder()
            .path(self.executable.clone())
            .sandbox(self.sandbox)
            .build()
            .map_err(Error::render)
    }
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self {
            executable: None,
            sandbox: true,
        }
    }
}

impl Renderer for ChromeRenderer {
    fn render(&self, markup: &str, stylesheets: &StylesheetList, output: &Path) -> Result<()> {
        let mut page = tempfile::Builder::new()
            .prefix("htmlpdf-")
            .suffix(".html")
            .tempfile()?;
        page.write_all(markup.as_bytes())?;
        page.flush()?;

        let url = Url::from_file_path(page.path()).map_err(|_| {
            Error::InvalidPath(format!("{} is not an absolute path", page.path().display()))
        })?;
        log::debug!("Loading {}", url);

        let browser = Browser::new(self.launch_options()?).map_err(Error::render)?;
        let tab = browser.new_tab().map_err(Error::render)?;
        tab.navigate_to(url.as_str()).map_err(Error::render)?;
        tab.wait_until_navigated().map_err(Error::render)?;

        for sheet in stylesheets {
            log::debug!("Applying stylesheet {}", sheet.origin());
            tab.evaluate(&style_injection_script(sheet.content())?, false)
                .map_err(Error::render)?;
        }

        let options = PrintToPdfOptions {
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            ..Default::default()
        };
        let pdf = tab.print_to_pdf(Some(options)).map_err(Error::render)?;

        fs::write(output, &pdf)?;
        log::info!("Wrote {} bytes to {}", pdf.len(), output.display());
        Ok(())
    }
}

/// Script appending one `<style>` element with `css` to the document head.
fn style_injection_script(css: &str) -> Result<String> {
    let literal = serde_json::to_string(css)
        .map_err(|e| Error::Render(format!("Stylesheet encoding error: {}", e)))?;
    Ok(format!(
        "(() => {{ const style = document.createElement('style'); \
         style.textContent = {}; \
         (document.head || document.documentElement).appendChild(style); }})()",
        literal
    ))
}
