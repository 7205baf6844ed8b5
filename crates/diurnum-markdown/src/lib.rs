//! Block-level markdown model for the diurnum engine.
//!
//! Parsing is a line-oriented structural scan: headings, front matter,
//! fenced code, and list runs become typed blocks, everything else passes
//! through verbatim as paragraphs. Inline structure (hyperlinks, heading
//! content shape) is resolved on demand with `pulldown-cmark`. Serializing
//! a parsed document reproduces it modulo whitespace normalisation.

mod block;
mod inline;
mod line;
mod scan;
mod serialize;

pub use block::{Block, CodeFence, Document, FrontMatter, Heading, ListBlock, Paragraph};
pub use inline::{heading_link, inline_links, links_in_text, InlineLink};
pub use serialize::{serialize, serialize_block};

/// Parse markdown text into an ordered block document. Structural scanning
/// cannot fail; malformed constructs degrade to verbatim paragraphs.
pub fn parse(text: &str) -> Document {
    Document {
        blocks: scan::scan_blocks(text),
    }
}
