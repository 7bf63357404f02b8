//! Markdown to HTML rendering pipeline.
//!
//! Converts markdown with pulldown-cmark, then post-processes the HTML to
//! turn diagram code fences into renderable markup: `mermaid` fences
//! become client-side `<div class="mermaid">` containers, `dot`/`graphviz`
//! fences are rendered server-side to inline SVG via [`docview_diagrams`].
//!
//! Diagram handling deliberately runs as HTML post-processing rather than
//! a parser hook, so the generic engine's default treatment of every other
//! fence language is untouched.

mod entity;
mod pipeline;

pub use pipeline::{MarkdownPipeline, RenderedPage};
