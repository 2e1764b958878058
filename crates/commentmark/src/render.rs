//! Render command: read markdown, format it as a comment block, print it.

use std::path::PathBuf;

use clap::Args;
use commentmark_config::{CliSettings, CommentConfig, Config, MarkdownConfig};
use commentmark_renderer::{CommentBackend, CommentStyle, MarkdownRenderer};
use pulldown_cmark::{Options, Parser};

use crate::error::CliError;
use crate::input::InputSource;
use crate::output::Output;

/// Arguments for rendering a document.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (reads standard input when omitted).
    path: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover commentmark.toml).
    #[arg(short, long, env = "COMMENTMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Comment block width (overrides config).
    #[arg(short, long)]
    width: Option<usize>,

    /// Enable verbose output (log configuration and render statistics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// or writing to standard output fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings { width: self.width };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        match &config.config_path {
            Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
            None => tracing::info!("No configuration file found, using defaults"),
        }

        let source = InputSource::from_arg(self.path);
        output.write(&format!("Parsing: {source}.\n"))?;

        let markdown = source.read()?;
        tracing::info!(source = %source, bytes = markdown.len(), "Read input");

        let rendered = render_document(&markdown, &config);

        output.write("Output:\n")?;
        output.write(&rendered)?;
        output.write("\n")?;
        Ok(())
    }
}

/// Render a markdown document as a comment block.
fn render_document(markdown: &str, config: &Config) -> String {
    let parser = Parser::new_ext(markdown, parser_options(&config.markdown));
    let backend = CommentBackend::new(comment_style(&config.comment));
    let result = MarkdownRenderer::new(backend).render(parser);
    tracing::info!(
        stats = %result.stats,
        bytes = result.output.len(),
        "Rendered document"
    );
    result.output
}

/// Markdown extensions enabled by the configuration.
fn parser_options(markdown: &MarkdownConfig) -> Options {
    let mut options = Options::empty();
    options.set(Options::ENABLE_TABLES, markdown.tables);
    options.set(Options::ENABLE_STRIKETHROUGH, markdown.strikethrough);
    options.set(Options::ENABLE_TASKLISTS, markdown.tasklists);
    options.set(Options::ENABLE_FOOTNOTES, markdown.footnotes);
    options
}

/// Comment layout from the validated configuration.
fn comment_style(comment: &CommentConfig) -> CommentStyle {
    CommentStyle {
        width: comment.width,
        text_indent: comment.text_indent,
        item_indent: comment.item_indent,
        gutter: comment.gutter.clone(),
        open: comment.open.clone(),
        close: comment.close.clone(),
        frame_char: comment.frame_char(),
        rule_char: comment.rule_char(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_matches_default_style() {
        let config = Config::default();
        assert_eq!(comment_style(&config.comment), CommentStyle::default());
    }

    #[test]
    fn test_parser_options() {
        let options = parser_options(&MarkdownConfig::default());
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(!options.contains(Options::ENABLE_TASKLISTS));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));

        let options = parser_options(&MarkdownConfig {
            tables: false,
            strikethrough: false,
            tasklists: true,
            footnotes: true,
        });
        assert!(!options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_FOOTNOTES));
    }

    #[test]
    fn test_render_document_with_tables_disabled() {
        let mut config = Config::default();
        config.markdown.tables = false;
        let rendered = render_document("| A |\n|---|\n| 1 |\n", &config);
        assert!(!rendered.contains("*    |"));
        assert!(rendered.contains(" *   | A | |---| | 1 |   \n"));
    }

    #[test]
    fn test_render_document_tasklists() {
        let mut config = Config::default();
        config.markdown.tasklists = true;
        let rendered = render_document("- [x] done\n- [ ] todo\n", &config);
        assert!(rendered.contains(" *    +[x] done\n *    +[ ] todo\n"));
    }
}
