use serde_yaml::Value;

/// Ordered top-level blocks of a parsed markdown document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A top-level markdown block.
///
/// The engine only distinguishes the block kinds it treats specially;
/// everything else rides along as a verbatim `Paragraph`.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    FrontMatter(FrontMatter),
    Heading(Heading),
    CodeFence(CodeFence),
    List(ListBlock),
    Paragraph(Paragraph),
}

/// YAML front matter delimited by `---` fences at the top of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// Raw YAML text between the fences.
    pub raw: String,
    pub line: usize,
    /// Decoded YAML, filled in by the annotation pass.
    pub data: Option<Value>,
}

/// An ATX or setext heading, normalised to depth plus inline text.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub depth: usize,
    pub text: String,
    pub line: usize,
}

/// A fenced code block, fences included in `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFence {
    pub lang: Option<String>,
    pub body: String,
    pub raw: String,
    pub line: usize,
    /// Decoded YAML for blocks tagged `yaml`, filled in by the annotation pass.
    pub data: Option<Value>,
}

/// A contiguous run of list lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub raw: String,
    pub line: usize,
}

/// Any other block content, passed through verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub raw: String,
    pub line: usize,
}

impl Block {
    /// First source line of the block, 1-based.
    pub fn line(&self) -> usize {
        match self {
            Block::FrontMatter(front) => front.line,
            Block::Heading(heading) => heading.line,
            Block::CodeFence(code) => code.line,
            Block::List(list) => list.line,
            Block::Paragraph(paragraph) => paragraph.line,
        }
    }

    /// The text in which inline links live, if the block has any.
    pub fn inline_text(&self) -> Option<&str> {
        match self {
            Block::Heading(heading) => Some(&heading.text),
            Block::List(list) => Some(&list.raw),
            Block::Paragraph(paragraph) => Some(&paragraph.raw),
            Block::FrontMatter(_) | Block::CodeFence(_) => None,
        }
    }

    /// Mutable access to the block's inline text, for link rewriting.
    pub fn inline_text_mut(&mut self) -> Option<&mut String> {
        match self {
            Block::Heading(heading) => Some(&mut heading.text),
            Block::List(list) => Some(&mut list.raw),
            Block::Paragraph(paragraph) => Some(&mut paragraph.raw),
            Block::FrontMatter(_) | Block::CodeFence(_) => None,
        }
    }
}
