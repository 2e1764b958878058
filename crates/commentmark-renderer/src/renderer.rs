//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Tag, TagEnd};

use crate::backend::{Handled, LinkSpec, ListMarker, RenderBackend};
use crate::state::{ElementStack, Frame, FrameKind, ListState, TableRowState, TextRun};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered document, bracketed by the backend's document hooks.
    pub output: String,
    /// Counts of the structural elements that were rendered.
    pub stats: RenderStats,
}

/// Counts of rendered structural elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub headings: usize,
    pub paragraphs: usize,
    /// Text runs that went through the reflow hook.
    pub text_runs: usize,
    pub lists: usize,
    pub ordered_items: usize,
    pub unordered_items: usize,
    pub links: usize,
    pub tables: usize,
    pub rules: usize,
}

/// Generic markdown renderer with pluggable backend.
///
/// Walks the `pulldown-cmark` event stream and keeps one content buffer per
/// open element. When an element closes, its buffer is handed to the matching
/// [`RenderBackend`] hook and the hook's output lands in the parent's buffer,
/// so every hook sees the already-rendered content of its children.
///
/// Inline formatting without a hook (emphasis, strong, strikethrough,
/// super/subscript, autolinks) does not split text: its text joins the
/// surrounding run.
pub struct MarkdownRenderer<B: RenderBackend> {
    backend: B,
    /// Open elements and their content buffers.
    stack: ElementStack,
    /// Text waiting to be handed to the text hook.
    run: TextRun,
    /// Ordered-list numbering, one counter per open list.
    lists: ListState,
    /// Cells of the table row being rendered.
    row: TableRowState,
    /// Whether we're inside an autolink (rendered as plain text).
    in_autolink: bool,
    stats: RenderStats,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            stack: ElementStack::default(),
            run: TextRun::default(),
            lists: ListState::default(),
            row: TableRowState::default(),
            in_autolink: false,
            stats: RenderStats::default(),
        }
    }

    /// Backend used by this renderer.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render markdown events and return the result.
    ///
    /// The document hooks bracket the output even when there are no events.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.flush_text();

        // Fold anything left open into its parent.
        while let Some(frame) = self.stack.pop() {
            self.stack.output().push_str(&frame.content);
        }

        let body = self.stack.finish();
        let mut output = String::with_capacity(body.len() + 256);
        self.backend.document_start(&mut output);
        output.push_str(&body);
        self.backend.document_end(&mut output);

        self.lists = ListState::default();
        self.in_autolink = false;

        RenderResult {
            output,
            stats: std::mem::take(&mut self.stats),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text)
            | Event::Code(text)
            | Event::Html(text)
            | Event::InlineHtml(text) => self.run.push_str(&text),
            Event::InlineMath(math) => {
                self.run.push_str(&format!("${math}$"));
            }
            Event::DisplayMath(math) => {
                self.run.push_str(&format!("$${math}$$"));
            }
            Event::FootnoteReference(label) => {
                self.run.push_str(&format!("[^{label}]"));
            }
            Event::SoftBreak => self.run.soft_break(),
            Event::HardBreak => self.run.hard_break(),
            Event::Rule => self.horizontal_rule(),
            Event::TaskListMarker(checked) => {
                self.run.push_str(if checked { "[x] " } else { "[ ] " });
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript => {}
            Tag::Link {
                link_type: LinkType::Autolink | LinkType::Email,
                ..
            } => {
                self.in_autolink = true;
            }
            Tag::Link {
                dest_url, title, ..
            } => self.open(FrameKind::Link {
                dest: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => self.open(FrameKind::Image {
                dest: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Paragraph => self.open(FrameKind::Paragraph),
            Tag::Heading { level, .. } => {
                self.open(FrameKind::Heading(heading_level_to_num(level)));
            }
            Tag::BlockQuote(_) => self.open(FrameKind::BlockQuote),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.open(FrameKind::CodeBlock(lang));
            }
            Tag::List(start) => {
                self.flush_text();
                // A nested list starts on its own line below the item text.
                if *self.stack.current() == FrameKind::Item {
                    let item = self.stack.output();
                    if !item.is_empty() && !item.ends_with('\n') {
                        item.push('\n');
                    }
                }
                self.lists.start(start.is_some());
                self.open(FrameKind::List);
            }
            Tag::Item => self.open(FrameKind::Item),
            Tag::FootnoteDefinition(label) => {
                self.open(FrameKind::FootnoteDefinition(label.into_string()));
            }
            Tag::Table(_) => self.open(FrameKind::Table),
            Tag::TableHead => {
                self.row.start();
                self.open(FrameKind::TableHead);
            }
            Tag::TableRow => {
                self.row.start();
                self.open(FrameKind::TableRow);
            }
            Tag::TableCell => self.open(FrameKind::TableCell),
            Tag::HtmlBlock
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => self.open(FrameKind::Passthrough),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
            TagEnd::Link if self.in_autolink => {
                self.in_autolink = false;
            }
            _ => {
                self.flush_text();
                if let Some(frame) = self.stack.pop() {
                    self.close(frame);
                }
            }
        }
    }

    /// Open an element, flushing text that precedes it.
    fn open(&mut self, kind: FrameKind) {
        self.flush_text();
        self.stack.push(kind);
    }

    /// Hand a closed element's content to its hook.
    fn close(&mut self, frame: Frame) {
        let Frame { kind, content } = frame;
        match kind {
            FrameKind::Document | FrameKind::Passthrough => {
                self.stack.output().push_str(&content);
            }
            FrameKind::Paragraph => {
                self.stats.paragraphs += 1;
                // Paragraphs of one list item share its line.
                let in_item = *self.stack.current() == FrameKind::Item;
                let out = self.stack.output();
                if in_item && !out.is_empty() && !out.ends_with('\n') {
                    out.push(' ');
                }
                self.backend.paragraph(&content, out);
            }
            FrameKind::Heading(level) => {
                self.stats.headings += 1;
                self.backend.heading(level, &content, self.stack.output());
            }
            FrameKind::BlockQuote => {
                self.backend.blockquote(&content, self.stack.output());
            }
            FrameKind::CodeBlock(lang) => {
                self.backend
                    .code_block(lang.as_deref(), &content, self.stack.output());
            }
            FrameKind::List => {
                self.lists.end();
                self.stats.lists += 1;
                self.backend.list(&content, self.stack.output());
            }
            FrameKind::Item => {
                let marker = self.lists.next_marker();
                match marker {
                    ListMarker::Ordered(_) => self.stats.ordered_items += 1,
                    ListMarker::Unordered => self.stats.unordered_items += 1,
                }
                self.backend.list_item(marker, &content, self.stack.output());
            }
            FrameKind::FootnoteDefinition(label) => {
                self.backend
                    .footnote_definition(&label, &content, self.stack.output());
            }
            FrameKind::Table => {
                self.stats.tables += 1;
                self.backend.table(&content, self.stack.output());
            }
            FrameKind::TableHead => {
                let header = self.row.take().join(" | ");
                self.backend.table_header(&header, self.stack.output());
            }
            FrameKind::TableRow => {
                let cells = self.row.take();
                self.backend.table_row(&cells, self.stack.output());
            }
            FrameKind::TableCell => {
                let mut cell = String::with_capacity(content.len());
                self.backend.table_cell(&content, &mut cell);
                self.row.push_cell(cell);
            }
            FrameKind::Link { dest, title } => {
                self.stats.links += 1;
                let link = LinkSpec {
                    dest: &dest,
                    title: &title,
                };
                let out = self.stack.output();
                if self.backend.link(link, &content, out) == Handled::No {
                    out.push_str(&content);
                }
            }
            FrameKind::Image { dest, title } => {
                let link = LinkSpec {
                    dest: &dest,
                    title: &title,
                };
                if self.stack.reflows() {
                    // Body-level images become part of the next text run.
                    let mut alt = String::with_capacity(content.len());
                    self.backend.image(link, &content, &mut alt);
                    self.run.push_str(&alt);
                } else {
                    self.backend.image(link, &content, self.stack.output());
                }
            }
        }
    }

    /// Hand the pending text run to the text hook, or append it verbatim
    /// inside inline elements.
    fn flush_text(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        if self.stack.reflows() {
            self.stats.text_runs += 1;
            self.backend.text(&run, self.stack.output());
        } else {
            self.stack.output().push_str(&run);
        }
    }

    fn horizontal_rule(&mut self) {
        self.flush_text();
        self.stats.rules += 1;
        self.backend.horizontal_rule(self.stack.output());
    }
}

impl<B: RenderBackend + Default> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

/// Write a labelled stats summary, used for logging.
impl std::fmt::Display for RenderStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = String::new();
        for (label, count) in [
            ("headings", self.headings),
            ("paragraphs", self.paragraphs),
            ("text runs", self.text_runs),
            ("lists", self.lists),
            ("ordered items", self.ordered_items),
            ("unordered items", self.unordered_items),
            ("links", self.links),
            ("tables", self.tables),
            ("rules", self.rules),
        ] {
            if count > 0 {
                if !parts.is_empty() {
                    parts.push_str(", ");
                }
                write!(parts, "{count} {label}")?;
            }
        }
        if parts.is_empty() {
            f.write_str("empty document")
        } else {
            f.write_str(&parts)
        }
    }
}
