//! htmlpdf CLI - HTML to PDF conversion tool

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use htmlpdf::{
    ChromeRenderer, Conversion, ConversionOptions, Converter, WarningSink, DEFAULT_MARGIN,
    DEFAULT_OUTPUT, DEFAULT_PAGE_SIZE,
};

#[derive(Parser, Debug)]
#[command(name = "htmlpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert HTML file with images to PDF", long_about = None)]
struct Cli {
    /// Path to the HTML file
    #[arg(value_name = "HTML_FILE")]
    html_file: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Page size (e.g., A4, Letter)
    #[arg(short, long, default_value = DEFAULT_PAGE_SIZE)]
    size: String,

    /// Page margin (e.g., 1cm, 0.5in)
    #[arg(short, long, default_value = DEFAULT_MARGIN)]
    margin: String,

    /// Ignore external CSS files
    #[arg(long)]
    no_css: bool,

    /// Disable page numbers
    #[arg(long)]
    no_page_numbers: bool,

    /// Chrome/Chromium executable used for rendering
    #[arg(long, value_name = "PATH", env = "HTMLPDF_CHROME")]
    chrome: Option<PathBuf>,

    /// Run the browser without its sandbox (needed as root in containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions::new()
            .with_output(&self.output)
            .with_page_size(&self.size)
            .with_margin(&self.margin)
            .with_document_css(!self.no_css)
            .with_page_numbers(!self.no_page_numbers)
    }

    fn renderer(&self) -> ChromeRenderer {
        let mut renderer = ChromeRenderer::new().with_sandbox(!self.no_sandbox);
        if let Some(ref chrome) = self.chrome {
            renderer = renderer.with_executable(chrome);
        }
        renderer
    }
}

/// Prints warnings to stderr without tearing the spinner.
struct ConsoleSink {
    progress: ProgressBar,
}

impl WarningSink for ConsoleSink {
    fn warn(&self, message: &str) {
        self.progress
            .suspend(|| eprintln!("{}: {}", "Warning".yellow().bold(), message));
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Converting {}...", cli.html_file.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let options = cli.conversion_options();
    let renderer = cli.renderer();
    log::debug!("Options: {:?}", options);
    log::debug!("Renderer: {:?}", renderer);

    let converter = Converter::new()
        .with_renderer(renderer)
        .with_sink(ConsoleSink {
            progress: pb.clone(),
        });
    let result = converter.convert(&cli.html_file, &options);
    pb.finish_and_clear();

    match status_line(&result) {
        Ok(line) => println!("{}", line),
        Err(line) => {
            eprintln!("{}", line);
            std::process::exit(1);
        }
    }
}

/// Final line shown to the user: `Ok` for stdout, `Err` for stderr.
fn status_line(result: &htmlpdf::Result<Conversion>) -> Result<String, String> {
    match result {
        Ok(conversion) => Ok(format!(
            "{} {} to {}",
            "Successfully converted".green(),
            conversion.input.display(),
            conversion.output.display()
        )),
        Err(e) => Err(format!("{}: {}", "Error".red().bold(), e)),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["htmlpdf", "doc.html"]).unwrap();
        let options = cli.conversion_options();

        assert_eq!(cli.html_file, PathBuf::from("doc.html"));
        assert_eq!(options, ConversionOptions::default());
        assert!(!cli.no_sandbox);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "htmlpdf", "doc.html", "-o", "out.pdf", "-s", "Letter", "-m", "2cm",
        ])
        .unwrap();
        let options = cli.conversion_options();

        assert_eq!(options.output, PathBuf::from("out.pdf"));
        assert_eq!(options.page_size, "Letter");
        assert_eq!(options.margin, "2cm");
        assert!(options.include_css);
        assert!(options.page_numbers);
    }

    #[test]
    fn test_long_flags_and_switches() {
        let cli = Cli::try_parse_from([
            "htmlpdf",
            "doc.html",
            "--output",
            "out.pdf",
            "--size",
            "Letter",
            "--margin",
            "0.5in",
            "--no-css",
            "--no-page-numbers",
        ])
        .unwrap();
        let options = cli.conversion_options();

        assert_eq!(
            options,
            ConversionOptions::new()
                .with_output("out.pdf")
                .with_page_size("Letter")
                .with_margin("0.5in")
                .with_document_css(false)
                .with_page_numbers(false)
        );
    }

    #[test]
    fn test_html_file_is_required() {
        assert!(Cli::try_parse_from(["htmlpdf"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["htmlpdf", "doc.html", "--landscape"]).is_err());
    }

    #[test]
    fn test_status_line() {
        colored::control::set_override(false);

        let conversion = Conversion {
            input: PathBuf::from("report.html"),
            output: PathBuf::from("report.pdf"),
            rewritten_images: 0,
            stylesheets: Vec::new(),
        };
        assert_eq!(
            status_line(&Ok(conversion)),
            Ok("Successfully converted report.html to report.pdf".to_string())
        );

        let failure = htmlpdf::Error::Render("browser exited".into());
        assert_eq!(
            status_line(&Err(failure)),
            Err("Error: Rendering error: browser exited".to_string())
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
