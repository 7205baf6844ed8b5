use crate::block::{Block, Document};

/// Serialize a document back into markdown text. Blocks are separated by
/// one blank line; output carries a trailing newline.
pub fn serialize(doc: &Document) -> String {
    let mut output = doc
        .blocks
        .iter()
        .map(serialize_block)
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if !output.is_empty() {
        output.push('\n');
    }
    output
}

/// Serialize a single block. List blocks re-emit with `-` bullets; the
/// underlying serialization context does not thread heading depth through
/// here, which is what the renderer's depth-agnostic list path relies on.
pub fn serialize_block(block: &Block) -> String {
    match block {
        Block::FrontMatter(front) => format!("---\n{}\n---", front.raw),
        Block::Heading(heading) => {
            if heading.text.is_empty() {
                "#".repeat(heading.depth)
            } else {
                format!("{} {}", "#".repeat(heading.depth), heading.text)
            }
        }
        Block::CodeFence(code) => code.raw.clone(),
        Block::List(list) => normalize_bullets(&list.raw),
        Block::Paragraph(paragraph) => paragraph.raw.clone(),
    }
}

/// Rewrite `*` and `+` bullets to `-`, leaving indentation, ordered items,
/// and continuation lines untouched.
fn normalize_bullets(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let indent_len = line.len() - line.trim_start().len();
            let trimmed = line.trim_start();
            if trimmed.starts_with("* ") || trimmed.starts_with("+ ") {
                format!("{}- {}", &line[..indent_len], &trimmed[2..])
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
