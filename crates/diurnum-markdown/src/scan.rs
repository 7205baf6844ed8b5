use crate::block::{Block, CodeFence, FrontMatter, Heading, ListBlock, Paragraph};
use crate::line::{collect_line_records, LineRecord};

pub(crate) fn scan_blocks(contents: &str) -> Vec<Block> {
    let lines = collect_line_records(contents);
    let mut blocks = Vec::new();
    let mut index = 0usize;

    if let Some((front, next)) = take_front_matter(&lines) {
        blocks.push(Block::FrontMatter(front));
        index = next;
    }

    while index < lines.len() {
        let line = &lines[index];

        if line.text.trim().is_empty() {
            index += 1;
            continue;
        }

        if let Some(fence) = detect_fence_start(&line.text) {
            let (block, next) = take_code_fence(&lines, index, fence);
            blocks.push(Block::CodeFence(block));
            index = next;
            continue;
        }

        if let Some(heading) = detect_atx_heading(line) {
            blocks.push(Block::Heading(heading));
            index += 1;
            continue;
        }

        if is_list_start(&line.text) {
            let (block, next) = take_list(&lines, index);
            blocks.push(Block::List(block));
            index = next;
            continue;
        }

        if let Some(heading) = detect_setext_heading(&lines, index) {
            blocks.push(Block::Heading(heading));
            index += 2;
            continue;
        }

        let (block, next) = take_paragraph(&lines, index);
        blocks.push(Block::Paragraph(block));
        index = next;
    }

    blocks
}

fn take_front_matter(lines: &[LineRecord]) -> Option<(FrontMatter, usize)> {
    let first = lines.first()?;
    if first.text.trim() != "---" {
        return None;
    }

    for (offset, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.text.trim();
        if trimmed == "---" || trimmed == "..." {
            let raw = join_lines(&lines[1..offset]);
            return Some((
                FrontMatter {
                    raw,
                    line: first.number,
                    data: None,
                },
                offset + 1,
            ));
        }
    }

    // No closing fence; the opening line is ordinary content.
    None
}

fn detect_atx_heading(line: &LineRecord) -> Option<Heading> {
    let trimmed_start = line.text.trim_start();
    if leading_indent_width(&line.text) > 3 {
        return None;
    }

    let mut pound_count = 0usize;
    for ch in trimmed_start.chars() {
        if ch == '#' {
            pound_count += 1;
        } else {
            break;
        }
    }

    if pound_count == 0 || pound_count > 6 {
        return None;
    }

    let after_hashes = &trimmed_start[pound_count..];
    if !after_hashes.is_empty() && !after_hashes.starts_with(char::is_whitespace) {
        return None;
    }

    let mut content = after_hashes.trim_start().trim_end();
    let stripped_hashes = content.trim_end_matches('#');
    if stripped_hashes.len() < content.len() {
        let candidate = &content[..stripped_hashes.len()];
        if candidate.ends_with(char::is_whitespace) {
            content = candidate.trim_end();
        }
    }

    Some(Heading {
        depth: pound_count,
        text: content.trim().to_string(),
        line: line.number,
    })
}

fn detect_setext_heading(lines: &[LineRecord], index: usize) -> Option<Heading> {
    let line = lines.get(index)?;
    let next = lines.get(index + 1)?;

    if leading_indent_width(&line.text) > 3 || leading_indent_width(&next.text) > 3 {
        return None;
    }

    let raw_line = line.text.trim_end();
    if raw_line.trim().is_empty() {
        return None;
    }

    let depth = match_setext_depth(next.text.trim())?;

    Some(Heading {
        depth,
        text: raw_line.trim().to_string(),
        line: line.number,
    })
}

fn match_setext_depth(line: &str) -> Option<usize> {
    if line.len() < 3 {
        return None;
    }

    let fence_char = line.chars().next()?;
    if fence_char != '=' && fence_char != '-' {
        return None;
    }

    if !line.chars().all(|ch| ch == fence_char) {
        return None;
    }

    Some(if fence_char == '=' { 1 } else { 2 })
}

#[derive(Clone, Copy)]
pub(crate) struct Fence {
    fence_char: char,
    fence_len: usize,
    info_offset: usize,
}

fn detect_fence_start(line: &str) -> Option<Fence> {
    let indent = leading_indent_width(line);
    if indent > 3 {
        return None;
    }

    let rest = line.trim_start();
    let mut chars = rest.chars();
    let first = chars.next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let mut count = 1usize;
    for ch in chars {
        if ch == first {
            count += 1;
        } else {
            break;
        }
    }

    if count < 3 {
        return None;
    }

    Some(Fence {
        fence_char: first,
        fence_len: count,
        info_offset: (line.len() - rest.len()) + count,
    })
}

fn is_closing_fence(line: &str, fence: Fence) -> bool {
    if leading_indent_width(line) > 3 {
        return false;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }

    trimmed.chars().all(|ch| ch == fence.fence_char) && trimmed.len() >= fence.fence_len
}

fn take_code_fence(lines: &[LineRecord], start: usize, fence: Fence) -> (CodeFence, usize) {
    let open = &lines[start];
    let info = open.text[fence.info_offset..].trim();
    let lang = info
        .split_whitespace()
        .next()
        .map(str::to_string)
        .filter(|token| !token.is_empty());

    let mut end = start + 1;
    while end < lines.len() && !is_closing_fence(&lines[end].text, fence) {
        end += 1;
    }

    let closed = end < lines.len();
    let body = join_lines(&lines[start + 1..end]);
    let raw_end = if closed { end + 1 } else { end };
    let raw = join_lines(&lines[start..raw_end]);

    (
        CodeFence {
            lang,
            body,
            raw,
            line: open.number,
            data: None,
        },
        raw_end,
    )
}

fn is_list_start(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ") {
        return true;
    }

    let digits = trimmed.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if digits == 0 || digits > 9 {
        return false;
    }
    let after = &trimmed[digits..];
    after.starts_with(". ") || after.starts_with(") ")
}

fn take_list(lines: &[LineRecord], start: usize) -> (ListBlock, usize) {
    let mut end = start;
    while end < lines.len() {
        let text = &lines[end].text;
        if text.trim().is_empty() || detect_fence_start(text).is_some() {
            break;
        }
        if end > start && detect_atx_heading(&lines[end]).is_some() {
            break;
        }
        end += 1;
    }

    (
        ListBlock {
            raw: join_lines(&lines[start..end]),
            line: lines[start].number,
        },
        end,
    )
}

fn take_paragraph(lines: &[LineRecord], start: usize) -> (Paragraph, usize) {
    let mut end = start + 1;
    while end < lines.len() {
        let line = &lines[end];
        if line.text.trim().is_empty()
            || detect_fence_start(&line.text).is_some()
            || detect_atx_heading(line).is_some()
            || is_list_start(&line.text)
        {
            break;
        }
        end += 1;
    }

    (
        Paragraph {
            raw: join_lines(&lines[start..end]),
            line: lines[start].number,
        },
        end,
    )
}

fn join_lines(lines: &[LineRecord]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_indent_width(line: &str) -> usize {
    let mut width = 0usize;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_atx_heading() {
        let blocks = scan_blocks("### Heading **Text** ##\n");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Heading(heading) => {
                assert_eq!(heading.depth, 3);
                assert_eq!(heading.text, "Heading **Text**");
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn parses_setext_heading() {
        let blocks = scan_blocks("Heading with [link](url)\n------\n");
        match &blocks[0] {
            Block::Heading(heading) => {
                assert_eq!(heading.depth, 2);
                assert_eq!(heading.text, "Heading with [link](url)");
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_setext_underlines() {
        let blocks = scan_blocks("Heading\n--=-\n");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn captures_front_matter() {
        let blocks = scan_blocks("---\ntitle: Test\n---\n\nBody\n");
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::FrontMatter(front) => {
                assert_eq!(front.raw, "title: Test");
                assert!(front.data.is_none());
            }
            other => panic!("expected front matter, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_front_matter_is_ordinary_content() {
        let blocks = scan_blocks("---\ntitle: Test\n");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn captures_fenced_code_with_lang() {
        let blocks = scan_blocks("```yaml\nkey: value\n```\n");
        match &blocks[0] {
            Block::CodeFence(code) => {
                assert_eq!(code.lang.as_deref(), Some("yaml"));
                assert_eq!(code.body, "key: value");
                assert_eq!(code.raw, "```yaml\nkey: value\n```");
            }
            other => panic!("expected code fence, got {other:?}"),
        }
    }

    #[test]
    fn headings_inside_fences_are_not_headings() {
        let blocks = scan_blocks("```\n# not a heading\n```\n");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::CodeFence(_)));
    }

    #[test]
    fn groups_list_lines() {
        let blocks = scan_blocks("- one\n- two\n\npara\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::List(_)));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
    }

    #[test]
    fn paragraph_stops_at_heading() {
        let blocks = scan_blocks("text\n# Heading\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::Paragraph(_)));
        assert!(matches!(blocks[1], Block::Heading(_)));
    }
}
