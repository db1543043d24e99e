//! Hierarchical key chains: assembly and validation
//!
//! A decoded key is an exclusively owned ancestor chain: the value you
//! hold is the leaf entity, and `parent` links walk back to the root.
//! Chains are built once from a parsed wire message and never mutated,
//! so they are acyclic by construction and safe to move across threads.
//!
//! Assembly ([`build`]) and validation ([`validate`]) are deliberately
//! separate: the builder is total and side-effect-free, and the
//! validator can be reused on chains from any source.

use crate::wire::PbKey;

/// Canonical in-memory representation of an entity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchicalKey {
    /// Entity kind. Cannot be empty for a valid key.
    pub kind: String,

    /// Numeric identifier. Either `id` or `name` must be zero for the
    /// key to be valid; if both are zero the key is incomplete.
    pub id: i64,

    /// String identifier.
    pub name: String,

    /// Namespace partitioning the data. A property of the whole chain:
    /// every ancestor must carry the same value.
    pub namespace: String,

    /// Parent key. Must be a complete key when present.
    pub parent: Option<Box<HierarchicalKey>>,
}

impl HierarchicalKey {
    /// Reports whether the key does not refer to a stored entity
    /// (neither a numeric id nor a name is set).
    pub fn is_incomplete(&self) -> bool {
        self.name.is_empty() && self.id == 0
    }
}

/// Fold a parsed key message into an ancestor chain.
///
/// Path elements arrive in wire order, root first. Each element becomes
/// the new head of the chain and takes ownership of the previous head as
/// its parent, so the final head is the leaf. The namespace comes from
/// the partition and is copied onto every node.
///
/// Returns `None` for an empty path. Performs no validation.
pub fn build(pb: &PbKey) -> Option<HierarchicalKey> {
    let namespace = pb
        .partition_id
        .as_ref()
        .map(|p| p.namespace_id.clone())
        .unwrap_or_default();

    let mut key: Option<HierarchicalKey> = None;
    for el in &pb.path {
        key = Some(HierarchicalKey {
            kind: el.kind.clone(),
            id: el.id(),
            name: el.name().to_owned(),
            namespace: namespace.clone(),
            parent: key.map(Box::new),
        });
    }
    key
}

/// Walk a chain from leaf to root, checking every structural invariant.
///
/// A key is valid when every node has a non-empty kind, does not set
/// both identifier variants, and has a parent (when present) that is
/// complete and shares the node's namespace. `None` is invalid.
pub fn validate(key: Option<&HierarchicalKey>) -> bool {
    let Some(mut node) = key else {
        return false;
    };
    loop {
        if node.kind.is_empty() {
            return false;
        }
        if !node.name.is_empty() && node.id != 0 {
            return false;
        }
        match &node.parent {
            Some(parent) => {
                if parent.is_incomplete() {
                    return false;
                }
                if parent.namespace != node.namespace {
                    return false;
                }
                node = parent.as_ref();
            }
            None => return true,
        }
    }
}
