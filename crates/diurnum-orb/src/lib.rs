//! Bidirectional transclusion engine over block-level markdown.
//!
//! The forward pass ([`build_orbs`]) turns a flat, heading-delimited
//! document into uniquely identified content units (orbs) nested by
//! heading depth, with every reference to one id resolving to the same
//! orb. The inverse pass ([`render_orb`]) flattens an orb back into
//! markdown, rebasing descendant heading levels onto its mount depth and
//! honouring each occurrence's rendering mode (embed, link, or strip).
//!
//! Build and render are synchronous and perform no I/O; the only
//! concurrency surface is [`visit_links`], which fans an async handler out
//! over a document's hyperlinks.

mod annotate;
mod build;
mod error;
mod links;
mod marker;
mod model;
mod render;

pub use annotate::{annotate_document, document_from_markdown};
pub use build::{build_orbs, BuildContext};
pub use error::{BuildError, BuildResult, DecodeError, PolicyError};
pub use links::{collect_links, visit_links, DocumentLink, HandlerError, LinkFailure, VisitError};
pub use marker::{decode_marker, MarkerRef};
pub use model::{LocalOrb, Node, Orb, OrbHandle, OrbSet, RefType};
pub use render::{cross_reference, render_orb, RenderOptions};
