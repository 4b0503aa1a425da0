//! Output rendering and formatting

use console::{Style, Term};
use mso_ops::OperationResult;
use mso_types::{ColorChoice, ItemKind, OperationTally};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_text(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_text(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::Label(label) => println!("{label}"),
            OperationResult::Path(path) => println!("{}", path.display()),
            OperationResult::Paths(paths) => {
                for path in paths {
                    println!("{}", path.display());
                }
            }
            OperationResult::Tables(tables) => self.render_list(tables, "tables"),
            OperationResult::Statements(statements) => self.render_list(statements, "statements"),
            OperationResult::Folders(folders) => {
                let lines: Vec<String> = folders.iter().map(|p| p.display().to_string()).collect();
                self.render_list(&lines, "folders");
            }
            OperationResult::Tally { kind, tally } => self.render_tally(*kind, tally),
        }
        Ok(())
    }

    fn render_list(&self, items: &[String], noun: &str) {
        if items.is_empty() {
            println!("No {noun} found.");
            return;
        }
        for item in items {
            println!("{item}");
        }
        println!("{}", self.style(Style::new().bold(), &format!("{} {noun}", items.len())));
    }

    fn render_tally(&self, kind: ItemKind, tally: &OperationTally) {
        let style = if tally.failed == 0 {
            Style::new().green()
        } else {
            Style::new().yellow()
        };
        println!("{}", self.style(style, &tally.summary(kind)));
    }

    fn style(&self, style: Style, text: &str) -> String {
        if self.supports_color() {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_is_honored() {
        assert!(OutputRenderer::new(false, ColorChoice::Always).supports_color());
        assert!(!OutputRenderer::new(false, ColorChoice::Never).supports_color());
    }

    #[test]
    fn test_plain_style_without_color() {
        let renderer = OutputRenderer::new(false, ColorChoice::Never);
        assert_eq!(renderer.style(Style::new().bold(), "3 tables"), "3 tables");
    }
}
