//! Forward transform: a flat block document into discovered orbs.
//!
//! Nesting is driven entirely by heading depth. The pass keeps an explicit
//! stack of open occurrences whose absolute depths strictly increase; an
//! incoming heading closes every scope at its depth or shallower before
//! being processed.

use diurnum_config::ReferenceSettings;
use diurnum_markdown::{Block, Document};
use log::debug;

use crate::error::BuildResult;
use crate::marker::decode_marker;
use crate::model::{LocalOrb, Node, Orb, OrbHandle, OrbSet};

/// Per-pass build options.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildContext {
    /// Refuse `ref=embed` markers and default unstated refs to `link`.
    pub prohibit_embeds: bool,
    /// Occurrence to resume under, for multi-document composition. Its
    /// depth is taken as the absolute depth of the initial scope and it is
    /// listed first in the pass's discovery output.
    pub seed: Option<LocalOrb>,
}

struct ScopeEntry {
    orb: OrbHandle,
    abs_depth: usize,
}

/// Build orbs out of `doc`, appending newly discovered orbs to `set`.
///
/// Returns the orbs of this pass in pre-order of first appearance. Content
/// outside any open scope (before the first marker heading) is not part of
/// any orb and is discarded. On error the pass aborts; `set` may already
/// hold content appended before the failing block and must be thrown away.
pub fn build_orbs(
    doc: Document,
    set: &mut OrbSet,
    reference: &ReferenceSettings,
    ctx: BuildContext,
) -> BuildResult<Vec<OrbHandle>> {
    let mut discovered = Vec::new();
    let mut stack: Vec<ScopeEntry> = Vec::new();

    if let Some(seed) = ctx.seed {
        discovered.push(seed.orb);
        stack.push(ScopeEntry {
            orb: seed.orb,
            abs_depth: seed.depth,
        });
    }

    for block in doc.blocks {
        match block {
            Block::Heading(mut heading) => {
                while stack
                    .last()
                    .is_some_and(|top| top.abs_depth >= heading.depth)
                {
                    stack.pop();
                }

                match decode_marker(&heading, reference, ctx.prohibit_embeds)? {
                    Some(marker) => {
                        let handle = match set.lookup(&marker.id) {
                            Some(existing) => existing,
                            None => {
                                debug!("discovered orb '{}' ({})", marker.alias, marker.id);
                                let handle =
                                    set.insert(Orb::new(marker.id, marker.alias, marker.kind));
                                discovered.push(handle);
                                handle
                            }
                        };

                        // After popping, any open scope is strictly
                        // shallower than this heading.
                        if let Some(top) = stack.last() {
                            let occurrence = LocalOrb {
                                orb: handle,
                                depth: heading.depth - top.abs_depth,
                                ref_type: marker.ref_type,
                            };
                            set.get_mut(top.orb).content.push(Node::Occurrence(occurrence));
                        }

                        stack.push(ScopeEntry {
                            orb: handle,
                            abs_depth: heading.depth,
                        });
                    }
                    None => {
                        if let Some(top) = stack.last() {
                            heading.depth -= top.abs_depth;
                            set.get_mut(top.orb)
                                .content
                                .push(Node::Block(Block::Heading(heading)));
                        }
                    }
                }
            }
            other => {
                if let Some(top) = stack.last() {
                    set.get_mut(top.orb).content.push(Node::Block(other));
                }
            }
        }
    }

    debug!("build pass discovered {} orb(s)", discovered.len());
    Ok(discovered)
}
