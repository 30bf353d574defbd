//! Error types. None of the collections fail on `add`, `remove` or `search`; these types cover
//! configuration and the invariant checks used by tests.

use thiserror::Error;

/// A [`KeySpec`][crate::keys::KeySpec] that cannot produce valid keys.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KeySpecError {
    /// There are no characters to build keys from.
    #[error("key alphabet must not be empty")]
    EmptyAlphabet,
    /// The length range is empty or admits empty keys.
    #[error("invalid key length range {min}..={max}")]
    InvalidLength {
        /// Requested minimum length.
        min: usize,
        /// Requested maximum length.
        max: usize,
    },
}

/// Returned when parsing a [`Variant`][crate::collection::Variant] from an unknown name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown collection variant {0:?}")]
pub struct UnknownVariant(pub String);

/// A broken structural invariant found by `validate`. Seeing one of these is always a bug in the
/// collection that produced it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    /// Two neighbouring keys of the in-order sequence are out of order.
    #[error("keys out of order: {before:?} precedes {after:?}")]
    Unsorted {
        /// The earlier key.
        before: String,
        /// The later, smaller key.
        after: String,
    },
    /// The recorded length doesn't match the number of stored keys.
    #[error("length is {recorded} but {counted} keys are stored")]
    Length {
        /// What `len` reports.
        recorded: usize,
        /// What a traversal finds.
        counted: usize,
    },
    /// An AVL node caches the wrong height.
    #[error("node {key:?} caches height {cached} but has height {actual}")]
    Height {
        /// Key of the offending node.
        key: String,
        /// Cached height.
        cached: usize,
        /// Recomputed height.
        actual: usize,
    },
    /// An AVL node's subtrees differ in height by more than one.
    #[error("node {key:?} is unbalanced: left height {left}, right height {right}")]
    Unbalanced {
        /// Key of the offending node.
        key: String,
        /// Height of the left subtree.
        left: usize,
        /// Height of the right subtree.
        right: usize,
    },
    /// A 2-3 node holds a number of keys other than one or two.
    #[error("2-3 node holds {0} keys")]
    KeyCount(usize),
    /// An internal 2-3 node doesn't have one more child than it has keys.
    #[error("2-3 node with {keys} keys has {children} children")]
    ChildCount {
        /// Keys in the node.
        keys: usize,
        /// Children of the node.
        children: usize,
    },
    /// 2-3 leaves were found at different depths.
    #[error("leaf at depth {found}, expected every leaf at depth {expected}")]
    LeafDepth {
        /// Depth of the first leaf found.
        expected: usize,
        /// Depth of the offending leaf.
        found: usize,
    },
}
