//! This crate exposes five ordered collections of string keys behind one contract,
//! mostly for educational purposes: comparing what balancing costs and what it buys.
//!
//! ## The collections
//!
//! Every collection implements [`KeyCollection`][collection::KeyCollection]: keys can be added
//! (duplicates are kept), removed one copy at a time, searched for, and listed in ascending
//! order.
//!
//! - [`linked_list::SortedList`] and [`sorted_vec::SortedVec`] keep keys in a sorted sequence.
//! - [`bst::Tree`] is a Binary Search Tree with no balancing at all.
//! - [`avl::Tree`] and [`two_three::Tree`] are self-balancing.
//!
//! ## Balanced trees
//!
//! A Binary Search Tree stores a key in each node such that everything in a node's left subtree
//! sorts before it and everything in its right subtree sorts at or after it. Searching takes
//! `O(height)`, but nothing stops the height from reaching `N`: inserting keys in ascending order
//! builds a chain.
//!
//! An AVL tree keeps the heights of every node's two subtrees within one of each other, rotating
//! nodes after each change to restore that. A 2-3 tree instead lets nodes hold one or two keys and
//! keeps every leaf at exactly the same depth, splitting full nodes and merging empty ones. Both
//! keep the height at `O(lg N)`.
//!
//! ## Random keys
//!
//! [`keys::KeyGenerator`] is a seedable source of random keys; feeding the same seed to each
//! collection's [`fill_random`][collection::KeyCollection::fill_random] fills them identically.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
pub mod collection;
pub mod error;
pub mod keys;
pub mod linked_list;
pub mod sorted_vec;
pub mod two_three;

pub use collection::{KeyCollection, Variant};
