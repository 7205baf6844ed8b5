//! Concurrent fan-out over every inline hyperlink in a document.
//!
//! Handlers run with no ordering guarantee and no built-in timeout or
//! backpressure; bounding latency is the caller's responsibility. Handlers
//! rewrite a link's own fields by returning the updated link. The tree
//! itself is only touched after every invocation has settled, so structural
//! races cannot occur.

use std::future::Future;
use std::ops::Range;

use diurnum_markdown::{inline_links, Document};
use futures::future::join_all;
use log::debug;
use thiserror::Error;

/// Error type accepted from link handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// One inline hyperlink in a document. `text` and `target` are free to
/// rewrite; the position fields are fixed by the collection pass.
#[derive(Debug, Clone)]
pub struct DocumentLink {
    pub text: String,
    pub target: String,
    block: usize,
    span: Range<usize>,
}

/// Aggregate failure of a visit pass, reported only after every handler
/// has settled. Successful rewrites are already applied.
#[derive(Debug, Error)]
#[error("{} link handler(s) failed", .failures.len())]
pub struct VisitError {
    pub failures: Vec<LinkFailure>,
}

/// A single failed handler invocation.
#[derive(Debug, Error)]
#[error("handler failed for '{target}': {source}")]
pub struct LinkFailure {
    pub target: String,
    #[source]
    pub source: HandlerError,
}

/// Collect every inline hyperlink in the document, in pre-order.
pub fn collect_links(doc: &Document) -> Vec<DocumentLink> {
    let mut links = Vec::new();
    for (block_index, block) in doc.blocks.iter().enumerate() {
        for link in inline_links(block) {
            links.push(DocumentLink {
                text: link.text,
                target: link.target,
                block: block_index,
                span: link.span,
            });
        }
    }
    links
}

/// Invoke `handler` once per inline hyperlink, all invocations launched
/// concurrently, and wait for every one to settle. Rewritten links are
/// applied back into their blocks; all failures are collected into one
/// [`VisitError`].
pub async fn visit_links<F, Fut>(doc: &mut Document, handler: F) -> Result<usize, VisitError>
where
    F: Fn(DocumentLink) -> Fut,
    Fut: Future<Output = Result<DocumentLink, HandlerError>>,
{
    let links = collect_links(doc);
    let total = links.len();
    let originals: Vec<(String, String)> = links
        .iter()
        .map(|link| (link.text.clone(), link.target.clone()))
        .collect();

    let settled = join_all(links.into_iter().map(&handler)).await;

    let mut edits = Vec::new();
    let mut failures = Vec::new();
    for ((text, target), outcome) in originals.into_iter().zip(settled) {
        match outcome {
            Ok(updated) => {
                if updated.text != text || updated.target != target {
                    edits.push(updated);
                }
            }
            Err(source) => failures.push(LinkFailure { target, source }),
        }
    }

    // Apply in descending span order so earlier spans stay valid.
    edits.sort_by(|a, b| (b.block, b.span.start).cmp(&(a.block, a.span.start)));
    let rewritten = edits.len();
    for edit in edits {
        if let Some(raw) = doc.blocks[edit.block].inline_text_mut() {
            raw.replace_range(edit.span, &format!("[{}]({})", edit.text, edit.target));
        }
    }

    debug!("visited {total} link(s), rewrote {rewritten}");

    if failures.is_empty() {
        Ok(total)
    } else {
        Err(VisitError { failures })
    }
}
