//! Inverse transform: an orb back into flat markdown text.
//!
//! Every descendant heading level is rebased by the depth at which the orb
//! mounts, so an orb's internal structure is independent of where it is
//! embedded. Rendering is deterministic and cannot fail.

use diurnum_config::{LinkTargetStyle, RenderSettings};
use diurnum_markdown::{serialize_block, Block, Heading};

use crate::model::{LocalOrb, Node, Orb, OrbHandle, OrbSet, RefType};

/// Options for a render pass.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub link_target: LinkTargetStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            link_target: LinkTargetStyle::RelativeDir {
                file_name: "orb.md".into(),
            },
        }
    }
}

impl From<&RenderSettings> for RenderOptions {
    fn from(settings: &RenderSettings) -> Self {
        RenderOptions {
            link_target: settings.link_target.clone(),
        }
    }
}

/// Render an orb mounted at `depth`. Depth 0 renders the body alone with
/// no heading line, the standalone-document form.
pub fn render_orb(set: &OrbSet, handle: OrbHandle, depth: usize, opts: &RenderOptions) -> String {
    render_occurrence(
        set,
        LocalOrb {
            orb: handle,
            depth,
            ref_type: RefType::Embed,
        },
        opts,
    )
}

fn render_occurrence(set: &OrbSet, local: LocalOrb, opts: &RenderOptions) -> String {
    let orb = set.get(local.orb);

    match local.ref_type {
        RefType::Strip => String::new(),
        RefType::Link => {
            let depth = local.depth.max(1);
            format!("{} > {}", "#".repeat(depth), cross_reference(orb, opts))
        }
        RefType::Embed => {
            let body = render_body(set, orb, local.depth, opts);
            if local.depth == 0 {
                return body;
            }

            let heading = format!(
                "{} {}",
                "#".repeat(local.depth),
                cross_reference(orb, opts)
            );
            if body.is_empty() {
                heading
            } else {
                format!("{heading}\n\n{body}")
            }
        }
    }
}

fn render_body(set: &OrbSet, orb: &Orb, depth: usize, opts: &RenderOptions) -> String {
    orb.content
        .iter()
        .map(|node| match node {
            Node::Block(Block::Heading(heading)) => serialize_block(&Block::Heading(Heading {
                depth: depth + heading.depth,
                text: heading.text.clone(),
                line: heading.line,
            })),
            // Lists go through the adapter's depth-agnostic sub-render.
            Node::Block(block) => serialize_block(block),
            Node::Occurrence(child) => render_occurrence(
                set,
                LocalOrb {
                    orb: child.orb,
                    depth: depth + child.depth,
                    ref_type: child.ref_type,
                },
                opts,
            ),
        })
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format the cross-reference link for an orb under the configured target
/// style.
pub fn cross_reference(orb: &Orb, opts: &RenderOptions) -> String {
    let target = match &opts.link_target {
        LinkTargetStyle::RelativeDir { file_name } => format!("../{}/{}", orb.id, file_name),
        LinkTargetStyle::Scheme { scheme } => format!("{}://{}", scheme, orb.id),
    };
    format!("[{}]({})", orb.alias, target)
}
