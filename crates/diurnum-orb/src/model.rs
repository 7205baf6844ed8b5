use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use diurnum_markdown::Block;

/// Index of an orb inside an [`OrbSet`]. Handles are cheap to copy and stay
/// valid for the lifetime of the set; orbs are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrbHandle(usize);

/// Rendering mode of one occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefType {
    /// Render full content inline.
    Embed,
    /// Render a heading-level cross-reference only, no body.
    Link,
    /// Render nothing; the occurrence and its descendants are omitted.
    Strip,
}

impl RefType {
    pub fn as_str(self) -> &'static str {
        match self {
            RefType::Embed => "embed",
            RefType::Link => "link",
            RefType::Strip => "strip",
        }
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "embed" => Ok(RefType::Embed),
            "link" => Ok(RefType::Link),
            "strip" => Ok(RefType::Strip),
            _ => Err(()),
        }
    }
}

/// A uniquely identified content unit. Content only grows during a build
/// pass; every reference sharing the id resolves to the same orb.
#[derive(Debug)]
pub struct Orb {
    pub id: String,
    pub alias: String,
    pub kind: String,
    pub content: Vec<Node>,
}

impl Orb {
    pub fn new(id: impl Into<String>, alias: impl Into<String>, kind: impl Into<String>) -> Self {
        Orb {
            id: id.into(),
            alias: alias.into(),
            kind: kind.into(),
            content: Vec::new(),
        }
    }
}

/// One item of an orb's content: an ordinary block (headings already
/// rebased to relative depth) or a nested occurrence.
#[derive(Debug)]
pub enum Node {
    Block(Block),
    Occurrence(LocalOrb),
}

/// One occurrence of an orb at a position. Purely positional metadata plus
/// a handle; it does not own the orb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalOrb {
    pub orb: OrbHandle,
    /// Heading level relative to the enclosing occurrence; ≥ 1 for any
    /// heading-originated occurrence, 0 only for standalone roots.
    pub depth: usize,
    pub ref_type: RefType,
}

/// Arena owning every orb discovered so far, addressed by handle and
/// indexed by id. Insertion order is discovery order. Sharing one set
/// across documents is what makes cross-document transclusion resolve to
/// a single orb per id.
#[derive(Debug, Default)]
pub struct OrbSet {
    orbs: Vec<Orb>,
    by_id: HashMap<String, OrbHandle>,
}

impl OrbSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new orb, returning its handle. The id must not already be
    /// present; callers resolve duplicates through [`OrbSet::lookup`] first.
    pub fn insert(&mut self, orb: Orb) -> OrbHandle {
        debug_assert!(!self.by_id.contains_key(&orb.id));
        let handle = OrbHandle(self.orbs.len());
        self.by_id.insert(orb.id.clone(), handle);
        self.orbs.push(orb);
        handle
    }

    pub fn lookup(&self, id: &str) -> Option<OrbHandle> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, handle: OrbHandle) -> &Orb {
        &self.orbs[handle.0]
    }

    pub fn get_mut(&mut self, handle: OrbHandle) -> &mut Orb {
        &mut self.orbs[handle.0]
    }

    /// Handles in discovery order.
    pub fn handles(&self) -> impl Iterator<Item = OrbHandle> {
        (0..self.orbs.len()).map(OrbHandle)
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }
}
