//! keycompat - decodes datastore entity keys across a wire-format migration
//!
//! The storage system this crate sits in front of changed its on-wire
//! key encoding. Application code still expects the old flat key shape
//! (project-qualified kind/identifier pairs with an explicit parent
//! pointer), so every opaque token must be decoded, whichever schema it
//! was written in, into one canonical [`FlatKey`].
//!
//! # Quick Start
//!
//! ```
//! use keycompat::{KeyDecoder, NoLegacyDecoder};
//!
//! // Modern-format keys are reinterpreted under the "glibrary" project.
//! let decoder = KeyDecoder::new(NoLegacyDecoder, "glibrary");
//!
//! let key = decoder.decode("Eg4KCVdvcmRJbmRleBCJCA")?;
//! assert_eq!(key.kind, "WordIndex");
//! assert_eq!(key.int_id, 1033);
//! # Ok::<(), keycompat::Error>(())
//! ```
//!
//! # Architecture
//!
//! Data flows one way: token → [`wire::parse_token`] → [`hierarchy::build`]
//! → [`hierarchy::validate`] → [`FlatKey::from_hierarchical`]. The
//! dispatcher ([`KeyDecoder`]) routes each token to the legacy decoder
//! or that modern pipeline. All of it is pure and call-local; nothing
//! is cached or shared between decodes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod error;
pub mod hierarchy;
pub mod legacy;
pub mod wire;

pub use decode::KeyDecoder;
pub use error::{Error, Result};
pub use hierarchy::{build, validate, HierarchicalKey};
pub use legacy::{FlatKey, LegacyDecoder, NoLegacyDecoder};
pub use wire::{parse_token, IdType, PartitionId, PathElement, PbKey};
