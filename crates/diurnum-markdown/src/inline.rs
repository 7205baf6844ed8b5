use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::block::{Block, Heading};

/// An inline hyperlink with its byte span inside the owning block's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLink {
    pub text: String,
    pub target: String,
    pub span: Range<usize>,
}

/// Collect the ordered inline links of a block. Code fences and front
/// matter never contribute links.
pub fn inline_links(block: &Block) -> Vec<InlineLink> {
    match block.inline_text() {
        Some(text) => links_in_text(text),
        None => Vec::new(),
    }
}

/// Collect inline links in a fragment of markdown text, with the span of
/// each full `[text](target)` element.
pub fn links_in_text(raw: &str) -> Vec<InlineLink> {
    let mut links = Vec::new();
    let mut current: Option<(String, Range<usize>, String)> = None;

    let parser = Parser::new_ext(raw, Options::all());
    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Link(_, dest, _)) => {
                current = Some((dest.to_string(), range, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, label)) = current.as_mut() {
                    label.push_str(&text);
                }
            }
            Event::End(Tag::Link(..)) => {
                if let Some((target, span, text)) = current.take() {
                    links.push(InlineLink { text, target, span });
                }
            }
            _ => {}
        }
    }

    links
}

/// Return the heading's sole hyperlink iff the heading's inline content is
/// exactly one link whose link text is plain text. Extra text, emphasis
/// inside the label, or a second link disqualifies it.
pub fn heading_link(heading: &Heading) -> Option<InlineLink> {
    let mut events = Parser::new_ext(&heading.text, Options::empty()).into_offset_iter();

    match events.next()? {
        (Event::Start(Tag::Paragraph), _) => {}
        _ => return None,
    }
    let (target, span) = match events.next()? {
        (Event::Start(Tag::Link(_, dest, _)), range) => (dest.to_string(), range),
        _ => return None,
    };
    let text = match events.next()? {
        (Event::Text(text), _) => text.to_string(),
        _ => return None,
    };
    match events.next()? {
        (Event::End(Tag::Link(..)), _) => {}
        _ => return None,
    }
    match events.next()? {
        (Event::End(Tag::Paragraph), _) => {}
        _ => return None,
    }
    if events.next().is_some() {
        return None;
    }

    Some(InlineLink { text, target, span })
}
