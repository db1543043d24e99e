//! Modern wire schema for entity keys
//!
//! The modern format serializes a key as a protobuf message (a partition
//! plus a root-first entity path), then base64url-encodes the bytes with
//! the padding stripped. The message structs here are hand-written prost
//! types; the field tags are fixed by the wire format and must not change.
//!
//! ## Contract
//!
//! - Tokens are base64url without padding; [`parse_token`] re-adds `=`
//!   to the next multiple of 4 before decoding.
//! - A path element carries exactly one of a numeric id or a string
//!   name. An element with neither is incomplete.
//! - Parsing is a pure transform with no side effects.

use base64::{engine::general_purpose::URL_SAFE as BASE64, Engine};
use prost::{Message, Oneof};

use crate::error::{Error, Result};

/// Partition scoping a set of entities: a project and a namespace.
///
/// The project id is not trusted from the wire by the decode path; the
/// project under which a key is reinterpreted comes from the
/// compatibility gate instead.
#[derive(Clone, PartialEq, Message)]
pub struct PartitionId {
    /// The ID of the project to which the entities belong.
    #[prost(string, tag = "2")]
    pub project_id: String,

    /// If not empty, the ID of the namespace to which the entities belong.
    #[prost(string, tag = "4")]
    pub namespace_id: String,
}

/// Identifier variants for a path element. At most one is set per element.
#[derive(Clone, PartialEq, Oneof)]
pub enum IdType {
    /// Numeric identifier.
    #[prost(int64, tag = "2")]
    Id(i64),

    /// String identifier.
    #[prost(string, tag = "3")]
    Name(String),
}

/// A (kind, id-or-name) pair used to construct a key path.
///
/// If either the id or the name is set, the element is complete.
/// If neither is set, the element is incomplete.
#[derive(Clone, PartialEq, Message)]
pub struct PathElement {
    /// The kind of the entity. Cannot be empty for a valid key.
    #[prost(string, tag = "1")]
    pub kind: String,

    /// The identifier variant, or `None` for an incomplete element.
    #[prost(oneof = "IdType", tags = "2, 3")]
    pub id_type: Option<IdType>,
}

impl PathElement {
    /// Numeric id of this element, or 0 when a name (or nothing) is set.
    pub fn id(&self) -> i64 {
        match self.id_type {
            Some(IdType::Id(id)) => id,
            _ => 0,
        }
    }

    /// String id of this element, or `""` when a numeric id (or nothing)
    /// is set.
    pub fn name(&self) -> &str {
        match &self.id_type {
            Some(IdType::Name(name)) => name,
            _ => "",
        }
    }
}

/// The modern binary key message.
///
/// The path is root first: the first element identifies a root entity,
/// each following element a child of the previous one. The path of a
/// stored entity is always fully complete.
#[derive(Clone, PartialEq, Message)]
pub struct PbKey {
    /// Partition the key belongs to.
    #[prost(message, optional, tag = "1")]
    pub partition_id: Option<PartitionId>,

    /// The entity path, root entity first. Never empty for a valid key.
    #[prost(message, repeated, tag = "2")]
    pub path: Vec<PathElement>,
}

/// Decode an opaque token into the modern key message.
///
/// Fails with [`Error::MalformedToken`] when the token is not valid
/// base64url (after padding repair) or the decoded bytes do not parse
/// as the key message.
pub fn parse_token(token: &str) -> Result<PbKey> {
    // Re-add padding.
    let mut padded = token.to_owned();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = BASE64
        .decode(padded.as_bytes())
        .map_err(|e| Error::MalformedToken(e.to_string()))?;

    PbKey::decode(bytes.as_slice()).map_err(|e| Error::MalformedToken(e.to_string()))
}
