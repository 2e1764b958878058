//! Shared state structs for markdown rendering.
//!
//! These structs track context during event processing: the stack of open
//! elements with their content buffers, pending text runs, list numbering
//! and table rows.

use crate::backend::ListMarker;

/// Kind of an open structural element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Document,
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock(Option<String>),
    List,
    Item,
    FootnoteDefinition(String),
    Table,
    TableHead,
    TableRow,
    TableCell,
    Link { dest: String, title: String },
    Image { dest: String, title: String },
    /// Block with no hook of its own (HTML blocks, definition lists).
    Passthrough,
}

impl FrameKind {
    /// Whether text inside this element is inline content rather than a
    /// free-standing run of body text.
    fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Heading(_)
                | Self::Item
                | Self::TableHead
                | Self::TableRow
                | Self::TableCell
                | Self::Link { .. }
                | Self::Image { .. }
        )
    }
}

/// An open element and the content rendered into it so far.
#[derive(Debug)]
pub(crate) struct Frame {
    pub kind: FrameKind,
    pub content: String,
}

/// Stack of open elements. The bottom frame is always the document.
#[derive(Debug)]
pub(crate) struct ElementStack {
    frames: Vec<Frame>,
}

impl Default for ElementStack {
    fn default() -> Self {
        Self {
            frames: vec![Frame {
                kind: FrameKind::Document,
                content: String::with_capacity(4096),
            }],
        }
    }
}

impl ElementStack {
    /// Open a new element.
    pub fn push(&mut self, kind: FrameKind) {
        self.frames.push(Frame {
            kind,
            content: String::new(),
        });
    }

    /// Close the innermost element. The document frame is never popped.
    pub fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Buffer of the innermost open element.
    pub fn output(&mut self) -> &mut String {
        // The document frame is pushed on construction and never popped.
        let last = self.frames.len() - 1;
        &mut self.frames[last].content
    }

    /// Kind of the innermost open element.
    pub fn current(&self) -> &FrameKind {
        self.frames
            .last()
            .map_or(&FrameKind::Document, |frame| &frame.kind)
    }

    /// Whether a text run at this point is body text that gets reflowed.
    ///
    /// Runs nested anywhere under an inline element (heading, list item,
    /// table cell, link, image) are appended verbatim instead.
    pub fn reflows(&self) -> bool {
        !self.frames.iter().any(|frame| frame.kind.is_inline())
    }

    /// Take the rendered document, leaving an empty document frame.
    pub fn finish(&mut self) -> String {
        self.frames.truncate(1);
        std::mem::take(self.output())
    }
}

/// Pending run of coalesced inline text.
///
/// Consecutive text events, soft breaks and inline containers without a hook
/// collapse into one run so the text hook sees the same text a reader does.
#[derive(Debug, Default)]
pub(crate) struct TextRun {
    buffer: String,
}

impl TextRun {
    /// Append literal text.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// A soft line break joins the surrounding words.
    pub fn soft_break(&mut self) {
        self.buffer.push(' ');
    }

    /// A hard line break is kept as a newline.
    pub fn hard_break(&mut self) {
        self.buffer.push('\n');
    }

    /// Take the run without trailing newlines, or `None` if nothing remains.
    pub fn take(&mut self) -> Option<String> {
        let trimmed = self.buffer.trim_end_matches('\n').len();
        self.buffer.truncate(trimmed);
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Ordered-list numbering, one counter per open list.
///
/// Each list starts counting from zero when it opens and its counter is
/// dropped when it closes, so nested lists never disturb the numbering of
/// the list that contains them.
#[derive(Debug, Default)]
pub(crate) struct ListState {
    stack: Vec<ListLevel>,
}

#[derive(Debug)]
struct ListLevel {
    ordered: bool,
    rendered: usize,
}

impl ListState {
    /// Open a list.
    pub fn start(&mut self, ordered: bool) {
        self.stack.push(ListLevel {
            ordered,
            rendered: 0,
        });
    }

    /// Close the innermost list.
    pub fn end(&mut self) {
        self.stack.pop();
    }

    /// Marker for the next item of the innermost list.
    pub fn next_marker(&mut self) -> ListMarker {
        match self.stack.last_mut() {
            Some(level) if level.ordered => {
                level.rendered += 1;
                ListMarker::Ordered(level.rendered)
            }
            _ => ListMarker::Unordered,
        }
    }
}

/// Cells of the table row currently being rendered.
#[derive(Debug, Default)]
pub(crate) struct TableRowState {
    cells: Vec<String>,
}

impl TableRowState {
    /// Start a new row (header or body).
    pub fn start(&mut self) {
        self.cells.clear();
    }

    /// Add a rendered cell to the current row.
    pub fn push_cell(&mut self, cell: String) {
        self.cells.push(cell);
    }

    /// Take the cells of the current row.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.cells)
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
