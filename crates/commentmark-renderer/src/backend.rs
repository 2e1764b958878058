//! Render backend trait for structural-element hooks.
//!
//! The renderer walks the markdown event stream and calls one hook per
//! recognized structural element, handing it content that has already been
//! rendered by the element's children. Every hook has a pass-through default,
//! so a backend only overrides the elements it formats.

/// Marker for a list item, computed by the renderer from its list state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListMarker {
    /// Item of an ordered list with its 1-based ordinal.
    Ordered(usize),
    /// Item of a bullet list.
    Unordered,
}

/// Link destination and title as parsed from the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkSpec<'a> {
    /// Link destination URL.
    pub dest: &'a str,
    /// Link title (empty if none was given).
    pub title: &'a str,
}

/// Whether a hook produced output for its element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handled {
    /// The hook rendered the element.
    Yes,
    /// The hook declined; the renderer appends the element's content as-is.
    No,
}

/// Backend trait for structural-element rendering.
///
/// Hooks receive the rendered content of the element and append their own
/// rendition to `out`. Default implementations pass content through unchanged
/// (or emit nothing for elements without content).
pub trait RenderBackend {
    /// Render the opening bracket of the whole document.
    fn document_start(&self, _out: &mut String) {}

    /// Render the closing bracket of the whole document.
    fn document_end(&self, _out: &mut String) {}

    /// Render a heading.
    ///
    /// # Arguments
    ///
    /// * `level` - Heading level (1-6)
    /// * `content` - Rendered inline content of the heading
    /// * `out` - Output buffer to write to
    fn heading(&self, _level: u8, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a paragraph.
    fn paragraph(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a run of plain text in block context.
    fn text(&self, run: &str, out: &mut String) {
        out.push_str(run);
    }

    /// Render a horizontal rule.
    fn horizontal_rule(&self, _out: &mut String) {}

    /// Render a list (ordered or not) from its rendered items.
    fn list(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a single list item.
    fn list_item(&self, _marker: ListMarker, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a link.
    ///
    /// `content` is the rendered display text. Returning [`Handled::No`]
    /// makes the renderer fall back to appending `content`.
    fn link(&self, _link: LinkSpec<'_>, _content: &str, _out: &mut String) -> Handled {
        Handled::No
    }

    /// Render a table from its rendered header and body rows.
    fn table(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render the table header row.
    ///
    /// `content` holds the header cells joined by `" | "`.
    fn table_header(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a table body row from its rendered cells.
    fn table_row(&self, cells: &[String], out: &mut String) {
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    /// Render a single table cell.
    fn table_cell(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The rendered code content
    /// * `out` - Output buffer to write to
    fn code_block(&self, _lang: Option<&str>, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render a blockquote.
    fn blockquote(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    /// Render an image. Default keeps the alt text only.
    fn image(&self, _link: LinkSpec<'_>, alt: &str, out: &mut String) {
        out.push_str(alt);
    }

    /// Render a footnote definition.
    fn footnote_definition(&self, _label: &str, content: &str, out: &mut String) {
        out.push_str(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Passthrough;

    impl RenderBackend for Passthrough {}

    #[test]
    fn test_default_hooks_pass_content_through() {
        let backend = Passthrough;
        let mut out = String::new();

        backend.document_start(&mut out);
        backend.heading(2, "Title", &mut out);
        backend.paragraph("para", &mut out);
        backend.horizontal_rule(&mut out);
        backend.list_item(ListMarker::Ordered(1), "item", &mut out);
        backend.document_end(&mut out);

        assert_eq!(out, "Titleparaitem");
    }

    #[test]
    fn test_default_link_is_unhandled() {
        let mut out = String::new();
        let handled = Passthrough.link(
            LinkSpec {
                dest: "http://x.test",
                title: "",
            },
            "label",
            &mut out,
        );
        assert_eq!(handled, Handled::No);
        assert!(out.is_empty());
    }

    #[test]
    fn test_default_table_row_joins_cells() {
        let mut out = String::new();
        Passthrough.table_row(&["a".to_owned(), "b".to_owned()], &mut out);
        assert_eq!(out, "a | b\n");
    }
}
