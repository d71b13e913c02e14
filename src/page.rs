//! `@page` rule composition.

use crate::options::ConversionOptions;

/// Footer margin box printing the current page number.
pub const PAGE_COUNTER_FOOTER: &str = "@bottom-center { content: counter(page); }";

/// Page geometry requested by the caller.
///
/// Rendered as the last stylesheet, so it overrides any `@page` rule the
/// document or the default layer declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRules {
    /// Page size token (`A4`, `Letter`, `210mm 297mm`, ...)
    pub size: String,
    /// Page margin token
    pub margin: String,
    /// Whether the page counter footer is emitted
    pub page_numbers: bool,
}

impl PageRules {
    /// Page rules with the given size and margin and page numbers enabled.
    pub fn new(size: impl Into<String>, margin: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            margin: margin.into(),
            page_numbers: true,
        }
    }

    /// Enable or disable the page counter footer.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// The `@page` block as CSS text.
    pub fn to_css(&self) -> String {
        let mut css = String::from("@page {\n");
        css.push_str(&format!("    size: {};\n", self.size));
        css.push_str(&format!("    margin: {};\n", self.margin));
        if self.page_numbers {
            css.push_str("    ");
            css.push_str(PAGE_COUNTER_FOOTER);
            css.push('\n');
        }
        css.push_str("}\n");
        css
    }
}

impl From<&ConversionOptions> for PageRules {
    fn from(options: &ConversionOptions) -> Self {
        PageRules::new(options.page_size.clone(), options.margin.clone())
            .with_page_numbers(options.page_numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rules_with_numbers() {
        let css = PageRules::new("A4", "1cm").to_css();
        assert_eq!(
            css,
            "@page {\n    size: A4;\n    margin: 1cm;\n    @bottom-center { content: counter(page); }\n}\n"
        );
    }

    #[test]
    fn test_page_rules_without_numbers() {
        let css = PageRules::new("Letter", "2cm")
            .with_page_numbers(false)
            .to_css();
        assert_eq!(css, "@page {\n    size: Letter;\n    margin: 2cm;\n}\n");
        assert!(!css.contains("counter(page)"));
        assert!(!css.contains("@bottom-center"));
    }

    #[test]
    fn test_page_rules_from_options() {
        let options = ConversionOptions::new()
            .with_page_size("210mm 297mm")
            .with_margin("0.5in")
            .with_page_numbers(false);
        let rules = PageRules::from(&options);

        assert_eq!(rules.size, "210mm 297mm");
        assert_eq!(rules.margin, "0.5in");
        assert!(!rules.page_numbers);
    }
}
