//! Token dispatch and the public decode entry point
//!
//! [`KeyDecoder::decode`] is the sole entry point callers use. It does
//! not know which schema a token is in up front: it trial-decodes the
//! legacy format first and falls back to the modern format, which is
//! the observable behavior of the system this crate replaces.
//!
//! Decoding allocates everything per call and reads no shared mutable
//! state, so one `KeyDecoder` can serve any number of threads.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::hierarchy::{build, validate};
use crate::legacy::{FlatKey, LegacyDecoder};
use crate::wire::parse_token;

/// Decodes opaque key tokens from either wire schema into the legacy
/// flat shape.
///
/// Holds the host-supplied legacy decoder and the compatibility gate:
/// the project under which modern-format keys are reinterpreted as
/// legacy keys. An empty gate leaves the modern path disabled.
#[derive(Debug, Clone)]
pub struct KeyDecoder<L> {
    legacy: L,
    conversion_project: String,
}

impl<L: LegacyDecoder> KeyDecoder<L> {
    /// Create a decoder with the given legacy decoder and gate project.
    pub fn new(legacy: L, conversion_project: impl Into<String>) -> Self {
        KeyDecoder {
            legacy,
            conversion_project: conversion_project.into(),
        }
    }

    /// Decode an opaque token into a legacy flat key.
    ///
    /// Tries the legacy schema first; a legacy decode that succeeds is
    /// returned as-is and the modern path is never consulted. On legacy
    /// failure the modern path runs: parse, build the ancestor chain,
    /// validate it, convert under the gate project.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] when the token matches neither
    ///   schema, or a modern-format token arrives while the gate is
    ///   unset.
    /// - [`Error::InvalidKey`] when the modern message parses but the
    ///   assembled chain fails validation.
    pub fn decode(&self, token: &str) -> Result<FlatKey> {
        match self.legacy.decode(token) {
            Ok(key) => return Ok(key),
            Err(err) => {
                debug!(
                    target: "keycompat::dispatch",
                    error = %err,
                    "Legacy decode rejected token, trying modern format"
                );
            }
        }

        if self.conversion_project.is_empty() {
            warn!(
                target: "keycompat::dispatch",
                "Token is not legacy-format and the conversion gate is unset"
            );
            return Err(Error::UnsupportedFormat);
        }

        // Legacy already rejected this token; a modern parse failure
        // means it matches neither schema.
        let pb = match parse_token(token) {
            Ok(pb) => pb,
            Err(err) => {
                debug!(
                    target: "keycompat::dispatch",
                    error = %err,
                    "Token matches neither key schema"
                );
                return Err(Error::UnsupportedFormat);
            }
        };

        let Some(key) = build(&pb) else {
            return Err(Error::InvalidKey);
        };
        if !validate(Some(&key)) {
            warn!(
                target: "keycompat::dispatch",
                kind = %key.kind,
                "Modern-format key failed validation"
            );
            return Err(Error::InvalidKey);
        }

        Ok(FlatKey::from_hierarchical(&key, &self.conversion_project))
    }
}
