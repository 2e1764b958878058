//! Event-driven markdown renderer with pluggable structural-element hooks.
//!
//! This crate provides a generic [`MarkdownRenderer`] that walks a
//! `pulldown-cmark` event stream and hands each structural element (heading,
//! paragraph, text run, list, list item, link, table, rule) to a
//! [`RenderBackend`] hook, together with the already-rendered content of its
//! children.
//!
//! # Architecture
//!
//! - [`RenderBackend`]: one hook per element kind, each with a pass-through default
//! - [`CommentBackend`]: renders the document as a C-style block comment with
//!   column-reflowed body text, numbered lists and synthesized table borders
//!
//! Parsing is left entirely to `pulldown-cmark`; this crate only formats.
//!
//! # Example
//!
//! ```
//! use pulldown_cmark::Parser;
//! use commentmark_renderer::{CommentBackend, MarkdownRenderer};
//!
//! let markdown = "# Hello\n\nSome text";
//! let parser = Parser::new(markdown);
//! let result = MarkdownRenderer::new(CommentBackend::default()).render(parser);
//! assert!(result.output.starts_with("/*\n"));
//! ```

mod backend;
mod comment;
mod renderer;
mod state;
mod util;

pub use backend::{Handled, LinkSpec, ListMarker, RenderBackend};
pub use comment::{CommentBackend, CommentStyle};
pub use renderer::{MarkdownRenderer, RenderResult, RenderStats};
pub use state::escape_html;
pub use util::escape_href;
