//! Module: db::key
//! Responsibility: composite-key framing and parsing.
//! Does not own: which records get indexed, or scan execution.
//! Boundary: every composite key written or decoded by `db` goes through [`KeyCodec`].
//!
//! Layout: `U+0000 index U+0000 component U+0000 ... component U+0000`.
//! Keys in this namespace sort before every simple key, and a partial key
//! made of the leading components is a byte prefix of every full key that
//! extends it.

use crate::{
    OWNER_INDEX,
    error::{ErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

/// Leading marker of every composite key.
pub const NAMESPACE: char = '\u{0}';

/// Terminator written after the index name and after each component.
pub const SEPARATOR: char = '\u{0}';

/// Highest code point; reserved as an exclusive upper bound for prefix ranges.
pub const MAX_RUNE: char = '\u{10FFFF}';

///
/// IndexDef
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexDef {
    pub name: &'static str,
    pub arity: usize,
}

/// Indexes known to the standard codec.
pub const STANDARD_INDEXES: &[IndexDef] = &[IndexDef {
    name: OWNER_INDEX,
    arity: 2,
}];

///
/// KeyEncodeError
/// (input boundary)
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum KeyEncodeError {
    #[error("unknown index '{name}'")]
    UnknownIndex { name: String },

    #[error("index '{index}' takes {expected} components, got {found}")]
    Arity {
        index: String,
        expected: usize,
        found: usize,
    },

    #[error("key component {position} of index '{index}' contains a reserved character")]
    ReservedCharacter { index: String, position: usize },
}

impl From<KeyEncodeError> for InternalError {
    fn from(err: KeyEncodeError) -> Self {
        Self::malformed(ErrorOrigin::Key, err.to_string())
    }
}

///
/// MalformedKeyError
/// (decode / corruption boundary)
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum MalformedKeyError {
    #[error("malformed composite key: missing namespace marker")]
    MissingNamespace,

    #[error("malformed composite key: missing trailing separator")]
    MissingTerminator,

    #[error("malformed composite key: unknown index '{name}'")]
    UnknownIndex { name: String },

    #[error("malformed composite key: index '{index}' expects {expected} components, found {found}")]
    ArityMismatch {
        index: String,
        expected: usize,
        found: usize,
    },
}

impl From<MalformedKeyError> for InternalError {
    fn from(err: MalformedKeyError) -> Self {
        Self::corruption(ErrorOrigin::Key, err.to_string())
    }
}

///
/// CompositeKey
///
/// Decoded form of a composite key.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompositeKey {
    pub index: String,
    pub components: Vec<String>,
}

///
/// KeyCodec
///

#[derive(Clone, Copy, Debug)]
pub struct KeyCodec {
    indexes: &'static [IndexDef],
}

impl Default for KeyCodec {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl KeyCodec {
    pub const STANDARD: Self = Self::new(STANDARD_INDEXES);

    #[must_use]
    pub const fn new(indexes: &'static [IndexDef]) -> Self {
        Self { indexes }
    }

    /// Build the full key for `index` from exactly `arity` components.
    pub fn encode<S: AsRef<str>>(
        &self,
        index: &str,
        components: &[S],
    ) -> Result<String, KeyEncodeError> {
        let def = self.lookup_for_encode(index)?;
        if components.len() != def.arity {
            return Err(KeyEncodeError::Arity {
                index: index.to_string(),
                expected: def.arity,
                found: components.len(),
            });
        }

        Self::frame(def, components)
    }

    /// Build the scan prefix shared by every key of `index` that starts with
    /// `leading`. Fewer components than the arity are allowed.
    pub fn encode_partial<S: AsRef<str>>(
        &self,
        index: &str,
        leading: &[S],
    ) -> Result<String, KeyEncodeError> {
        let def = self.lookup_for_encode(index)?;
        if leading.len() > def.arity {
            return Err(KeyEncodeError::Arity {
                index: index.to_string(),
                expected: def.arity,
                found: leading.len(),
            });
        }

        Self::frame(def, leading)
    }

    /// Split a key produced by [`Self::encode`] back into its parts.
    pub fn decode(&self, key: &str) -> Result<CompositeKey, MalformedKeyError> {
        let rest = key
            .strip_prefix(NAMESPACE)
            .ok_or(MalformedKeyError::MissingNamespace)?;
        let body = rest
            .strip_suffix(SEPARATOR)
            .ok_or(MalformedKeyError::MissingTerminator)?;

        let mut parts = body.split(SEPARATOR);
        let name = parts.next().unwrap_or_default();
        let def = self
            .lookup(name)
            .ok_or_else(|| MalformedKeyError::UnknownIndex {
                name: name.to_string(),
            })?;

        let components: Vec<String> = parts.map(str::to_string).collect();
        if components.len() != def.arity {
            return Err(MalformedKeyError::ArityMismatch {
                index: def.name.to_string(),
                expected: def.arity,
                found: components.len(),
            });
        }

        Ok(CompositeKey {
            index: def.name.to_string(),
            components,
        })
    }

    fn lookup(&self, name: &str) -> Option<&'static IndexDef> {
        self.indexes.iter().find(|def| def.name == name)
    }

    fn lookup_for_encode(&self, name: &str) -> Result<&'static IndexDef, KeyEncodeError> {
        self.lookup(name).ok_or_else(|| KeyEncodeError::UnknownIndex {
            name: name.to_string(),
        })
    }

    fn frame<S: AsRef<str>>(def: &IndexDef, components: &[S]) -> Result<String, KeyEncodeError> {
        let mut capacity = 2 + def.name.len();
        for (position, component) in components.iter().enumerate() {
            let component = component.as_ref();
            if is_reserved(component) {
                return Err(KeyEncodeError::ReservedCharacter {
                    index: def.name.to_string(),
                    position,
                });
            }
            capacity += component.len() + 1;
        }

        let mut key = String::with_capacity(capacity);
        key.push(NAMESPACE);
        key.push_str(def.name);
        key.push(SEPARATOR);
        for component in components {
            key.push_str(component.as_ref());
            key.push(SEPARATOR);
        }

        Ok(key)
    }
}

/// True when `value` cannot be used as a key component.
#[must_use]
pub fn is_reserved(value: &str) -> bool {
    value.contains([SEPARATOR, MAX_RUNE])
}

///
/// TESTS
///
