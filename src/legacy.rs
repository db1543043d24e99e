//! Legacy flat key shape and the gated modern-to-legacy converter
//!
//! Application code written against the old storage system expects keys
//! in a flat, project-qualified shape. [`FlatKey::from_hierarchical`]
//! maps a validated modern chain into that shape under an explicit
//! compatibility project; the mapping is lossy (the namespace is
//! dropped) and one-directional.
//!
//! The legacy wire format itself is not decoded here. Hosts that still
//! receive legacy-format tokens plug their decoder in through
//! [`LegacyDecoder`].

use crate::error::{Error, Result};
use crate::hierarchy::HierarchicalKey;

/// Legacy flat key: the externally visible shape application code
/// still expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatKey {
    /// Entity kind. Non-empty for a complete key.
    pub kind: String,

    /// Numeric identifier; zero when `string_id` is set.
    pub int_id: i64,

    /// String identifier; empty when `int_id` is set.
    pub string_id: String,

    /// Project qualifying the key.
    pub app_id: String,

    /// Parent key. Owned exclusively; chains are acyclic by construction.
    pub parent: Option<Box<FlatKey>>,
}

impl FlatKey {
    /// Convert a validated hierarchical chain into the legacy flat shape.
    ///
    /// Every node gets `project` as its `app_id`; the namespace has no
    /// counterpart in the legacy shape and is dropped. Infallible: a
    /// chain that passed validation always converts.
    pub fn from_hierarchical(key: &HierarchicalKey, project: &str) -> FlatKey {
        FlatKey {
            kind: key.kind.clone(),
            int_id: key.id,
            string_id: key.name.clone(),
            app_id: project.to_owned(),
            parent: key
                .parent
                .as_deref()
                .map(|p| Box::new(FlatKey::from_hierarchical(p, project))),
        }
    }
}

/// Decoder for the legacy wire format, supplied by the host.
///
/// The legacy byte layout predates this crate and is decoded elsewhere;
/// the dispatcher only needs a single trial-decode method. An
/// implementation signals "this token is not in my schema" by returning
/// [`Error::MalformedToken`], which tells the dispatcher to fall back
/// to the modern format.
pub trait LegacyDecoder {
    /// Decode `token` directly into the legacy flat shape.
    fn decode(&self, token: &str) -> Result<FlatKey>;
}

/// Legacy decoder for hosts that only ever see modern-format keys.
/// Rejects every token, so the dispatcher always falls through to the
/// modern path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLegacyDecoder;

impl LegacyDecoder for NoLegacyDecoder {
    fn decode(&self, _token: &str) -> Result<FlatKey> {
        Err(Error::MalformedToken(
            "no legacy decoder configured".to_string(),
        ))
    }
}
