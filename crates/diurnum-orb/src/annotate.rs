//! Annotation pass: decode YAML-bearing blocks in place.
//!
//! Front matter and fenced blocks tagged `yaml` get their decoded value
//! attached; everything else passes through unchanged. The first decode
//! failure aborts the walk and names the offending block's line.

use diurnum_markdown::{Block, Document};

use crate::error::DecodeError;

/// Annotate every YAML-bearing block in the document. Fail-fast: blocks
/// after the first malformed one are left untouched.
pub fn annotate_document(doc: &mut Document) -> Result<(), DecodeError> {
    for block in &mut doc.blocks {
        annotate_block(block)?;
    }
    Ok(())
}

fn annotate_block(block: &mut Block) -> Result<(), DecodeError> {
    match block {
        Block::FrontMatter(front) => {
            let data =
                serde_yaml::from_str(&front.raw).map_err(|source| DecodeError::Yaml {
                    line: front.line,
                    source,
                })?;
            front.data = Some(data);
        }
        Block::CodeFence(code) if code.lang.as_deref() == Some("yaml") => {
            let data = serde_yaml::from_str(&code.body).map_err(|source| DecodeError::Yaml {
                line: code.line,
                source,
            })?;
            code.data = Some(data);
        }
        _ => {}
    }
    Ok(())
}

/// Parse markdown and run the annotation pass, the usual way documents
/// enter the engine.
pub fn document_from_markdown(text: &str) -> Result<Document, DecodeError> {
    let mut doc = diurnum_markdown::parse(text);
    annotate_document(&mut doc)?;
    Ok(doc)
}
