//! Comment-block backend for markdown rendering.
//!
//! Produces a plain-text rendition framed as a C-style block comment:
//!
//! ```text
//! /*
//!  *====================...
//!  *   Body text reflowed to a fixed column width, wrapping strictly by
//!  * character count.
//!  *
//!  *    1.) ordered item
//!  *    +unordered item
//!  *
//!  *====================...
//!  */
//! ```

use crate::backend::{Handled, LinkSpec, ListMarker, RenderBackend};
use crate::state::escape_html;
use crate::util::escape_href;

/// Columns kept free at the right edge before a text run wraps.
const WRAP_MARGIN: usize = 3;

/// Spaces appended after the last character of a text run.
const TRAILING_PAD: usize = 3;

/// Indent before the synthesized table header border.
const TABLE_INDENT: usize = 4;

/// Extra dashes added to each side of the table header border.
const TABLE_BORDER_EXTRA: usize = 6;

/// Layout of the generated comment block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentStyle {
    /// Width of the frame and rule lines; text wraps `3` columns short of it.
    pub width: usize,
    /// Spaces between the gutter and the first line of a text run.
    pub text_indent: usize,
    /// Spaces between the gutter and a list item marker or link.
    pub item_indent: usize,
    /// Left-margin prefix of every body line.
    pub gutter: String,
    /// Line that opens the comment.
    pub open: String,
    /// Line that closes the comment.
    pub close: String,
    /// Character repeated in the opening and closing frame lines.
    pub frame_char: char,
    /// Character repeated in horizontal rules.
    pub rule_char: char,
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self {
            width: 100,
            text_indent: 3,
            item_indent: 4,
            gutter: " *".to_owned(),
            open: "/*".to_owned(),
            close: " */".to_owned(),
            frame_char: '=',
            rule_char: '-',
        }
    }
}

/// Comment-block render backend.
#[derive(Clone, Debug, Default)]
pub struct CommentBackend {
    style: CommentStyle,
}

impl CommentStyle {
    /// Smallest usable `width` for a given `text_indent`: anything narrower
    /// leaves no room for text before the wrap column.
    #[must_use]
    pub const fn min_width(text_indent: usize) -> usize {
        text_indent + WRAP_MARGIN
    }
}

impl CommentBackend {
    /// Create a backend with the given layout.
    #[must_use]
    pub fn new(style: CommentStyle) -> Self {
        Self { style }
    }

    /// Layout used by this backend.
    #[must_use]
    pub fn style(&self) -> &CommentStyle {
        &self.style
    }

    /// Write the gutter followed by `width` copies of `c`.
    fn frame_line(&self, c: char, out: &mut String) {
        out.push_str(&self.style.gutter);
        push_repeat(out, c, self.style.width);
    }

    /// Break a text run onto a fresh gutter line.
    fn wrap(&self, out: &mut String) {
        out.push('\n');
        out.push_str(&self.style.gutter);
        out.push(' ');
    }
}

impl RenderBackend for CommentBackend {
    fn document_start(&self, out: &mut String) {
        out.push_str(&self.style.open);
        out.push('\n');
        self.frame_line(self.style.frame_char, out);
        out.push('\n');
    }

    fn document_end(&self, out: &mut String) {
        self.frame_line(self.style.frame_char, out);
        out.push('\n');
        out.push_str(&self.style.close);
    }

    fn heading(&self, _level: u8, content: &str, out: &mut String) {
        out.push_str(content);
        end_line(out);
    }

    fn paragraph(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    fn text(&self, run: &str, out: &mut String) {
        let wrap_at = self.style.width.saturating_sub(WRAP_MARGIN);

        out.push_str(&self.style.gutter);
        push_repeat(out, ' ', self.style.text_indent);

        let mut column = self.style.text_indent;
        for c in run.chars() {
            if c == '\n' {
                self.wrap(out);
                column = 1;
                continue;
            }
            out.push(c);
            column += 1;
            if column >= wrap_at {
                self.wrap(out);
                column = 1;
            }
        }

        push_repeat(out, ' ', TRAILING_PAD);
        out.push('\n');
        out.push_str(&self.style.gutter);
        out.push('\n');
    }

    fn horizontal_rule(&self, out: &mut String) {
        self.frame_line(self.style.rule_char, out);
        out.push('\n');
    }

    fn list(&self, content: &str, out: &mut String) {
        out.push_str(content);
        out.push_str(&self.style.gutter);
        out.push('\n');
    }

    fn list_item(&self, marker: ListMarker, content: &str, out: &mut String) {
        out.push_str(&self.style.gutter);
        push_repeat(out, ' ', self.style.item_indent);
        match marker {
            ListMarker::Ordered(n) => {
                out.push_str(&n.to_string());
                out.push_str(".) ");
            }
            ListMarker::Unordered => out.push('+'),
        }
        out.push_str(content);
        end_line(out);
    }

    fn link(&self, link: LinkSpec<'_>, _content: &str, out: &mut String) -> Handled {
        out.push_str(&self.style.gutter);
        push_repeat(out, ' ', self.style.item_indent);
        if !link.title.is_empty() {
            out.push_str(&escape_html(link.title));
        }
        out.push_str(" => ");
        if !link.dest.is_empty() {
            out.push_str(&escape_href(link.dest));
        }
        out.push('\n');
        for _ in 0..2 {
            out.push_str(&self.style.gutter);
            out.push('\n');
        }
        Handled::Yes
    }

    fn table(&self, content: &str, out: &mut String) {
        out.push_str(content);
    }

    fn table_header(&self, content: &str, out: &mut String) {
        let border = content.len() + TABLE_BORDER_EXTRA;

        push_repeat(out, ' ', TABLE_INDENT);
        push_repeat(out, '-', border);
        out.push_str("\n*    |");
        out.push_str(content);
        push_repeat(out, ' ', TABLE_INDENT);
        out.push('|');
        push_repeat(out, '-', border);
    }
}

fn push_repeat(out: &mut String, c: char, times: usize) {
    out.extend(std::iter::repeat_n(c, times));
}

/// Terminate the current line unless it already is.
fn end_line(out: &mut String) {
    if !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(backend: &CommentBackend, run: &str) -> String {
        let mut out = String::new();
        backend.text(run, &mut out);
        out
    }

    #[test]
    fn test_document_bracketing() {
        let backend = CommentBackend::default();
        let mut out = String::new();
        backend.document_start(&mut out);
        assert_eq!(out, format!("/*\n *{}\n", "=".repeat(100)));

        out.clear();
        backend.document_end(&mut out);
        assert_eq!(out, format!(" *{}\n */", "=".repeat(100)));
    }

    #[test]
    fn test_text_short_run() {
        let out = text(&CommentBackend::default(), "Hello world.");
        assert_eq!(out, " *   Hello world.   \n *\n");
    }

    #[test]
    fn test_text_wraps_mid_word_by_character_count() {
        let run = "a".repeat(200);
        let out = text(&CommentBackend::default(), &run);
        let lines: Vec<&str> = out.lines().collect();

        // 94 chars fit on the first line (column 3 -> 97), 96 on the next.
        assert_eq!(lines[0], format!(" *   {}", "a".repeat(94)));
        assert_eq!(lines[1], format!(" * {}", "a".repeat(96)));
        assert_eq!(lines[2], format!(" * {}   ", "a".repeat(10)));
        assert_eq!(lines[3], " *");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_text_line_width_bound() {
        let backend = CommentBackend::default();
        let run = "word ".repeat(100);
        let out = text(&backend, &run);
        for line in out.lines() {
            assert!(line.trim_end().len() <= backend.style().width, "{line:?}");
        }
    }

    #[test]
    fn test_text_wrap_at_narrow_width() {
        let backend = CommentBackend::new(CommentStyle {
            width: 10,
            ..CommentStyle::default()
        });
        // Wraps when the column reaches 7: four chars on the first line,
        // six on each following one.
        let out = text(&backend, "abcdefghijklmn");
        assert_eq!(out, " *   abcd\n * efghij\n * klmn   \n *\n");
    }

    #[test]
    fn test_text_hard_break_keeps_gutter() {
        let out = text(&CommentBackend::default(), "one\ntwo");
        assert_eq!(out, " *   one\n * two   \n *\n");
    }

    #[test]
    fn test_text_counts_characters_not_bytes() {
        let backend = CommentBackend::new(CommentStyle {
            width: 10,
            ..CommentStyle::default()
        });
        let out = text(&backend, "\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}");
        assert_eq!(out, " *   \u{e9}\u{e9}\u{e9}\u{e9}\n * \u{e9}   \n *\n");
    }

    #[test]
    fn test_horizontal_rule() {
        let mut out = String::new();
        CommentBackend::default().horizontal_rule(&mut out);
        assert_eq!(out, format!(" *{}\n", "-".repeat(100)));
    }

    #[test]
    fn test_list_items() {
        let backend = CommentBackend::default();
        let mut out = String::new();
        backend.list_item(ListMarker::Ordered(1), "a", &mut out);
        backend.list_item(ListMarker::Ordered(2), "b", &mut out);
        backend.list_item(ListMarker::Unordered, "c", &mut out);
        assert_eq!(out, " *    1.) a\n *    2.) b\n *    +c\n");
    }

    #[test]
    fn test_list_item_empty_content_is_bare_marker() {
        let mut out = String::new();
        CommentBackend::default().list_item(ListMarker::Unordered, "", &mut out);
        assert_eq!(out, " *    +\n");
    }

    #[test]
    fn test_list_item_does_not_double_line_break() {
        let mut out = String::new();
        CommentBackend::default().list_item(ListMarker::Unordered, "a\n *    +b\n", &mut out);
        assert_eq!(out, " *    +a\n *    +b\n");
    }

    #[test]
    fn test_list_appends_separator() {
        let mut out = String::new();
        CommentBackend::default().list(" *    +a\n", &mut out);
        assert_eq!(out, " *    +a\n *\n");
    }

    #[test]
    fn test_link_drops_display_text() {
        let mut out = String::new();
        let handled = CommentBackend::default().link(
            LinkSpec {
                dest: "http://x.test",
                title: "Title",
            },
            "Example",
            &mut out,
        );
        assert_eq!(handled, Handled::Yes);
        assert_eq!(out, " *    Title => http://x.test\n *\n *\n");
    }

    #[test]
    fn test_link_escapes_title_and_dest() {
        let mut out = String::new();
        CommentBackend::default().link(
            LinkSpec {
                dest: "/a b?x=1&y=2",
                title: "<b>",
            },
            "",
            &mut out,
        );
        assert_eq!(out, " *    &lt;b&gt; => /a%20b?x=1&amp;y=2\n *\n *\n");
    }

    #[test]
    fn test_link_without_title_or_dest() {
        let mut out = String::new();
        CommentBackend::default().link(LinkSpec::default(), "", &mut out);
        assert_eq!(out, " *     => \n *\n *\n");
    }

    #[test]
    fn test_table_header_border_uses_byte_length() {
        let mut out = String::new();
        CommentBackend::default().table_header("A | B", &mut out);
        let dashes = "-".repeat(11);
        assert_eq!(out, format!("    {dashes}\n*    |A | B    |{dashes}"));

        out.clear();
        CommentBackend::default().table_header("\u{e9}", &mut out);
        assert!(out.starts_with(&format!("    {}\n", "-".repeat(8))));
    }

    #[test]
    fn test_heading_is_verbatim_line() {
        let mut out = String::new();
        let backend = CommentBackend::default();
        backend.heading(1, "Title", &mut out);
        backend.heading(3, "", &mut out);
        assert_eq!(out, "Title\n");
    }

    #[test]
    fn test_min_width_leaves_room_to_wrap() {
        assert_eq!(CommentStyle::min_width(3), 6);
        let style = CommentStyle::default();
        assert!(style.width > CommentStyle::min_width(style.text_indent));
    }

    #[test]
    fn test_custom_markers() {
        let backend = CommentBackend::new(CommentStyle {
            width: 5,
            gutter: " #".to_owned(),
            open: "#if 0".to_owned(),
            close: "#endif".to_owned(),
            frame_char: '*',
            ..CommentStyle::default()
        });
        let mut out = String::new();
        backend.document_start(&mut out);
        backend.document_end(&mut out);
        assert_eq!(out, "#if 0\n #*****\n #*****\n#endif");
    }
}
