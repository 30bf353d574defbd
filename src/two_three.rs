//! A 2-3 tree. Every node holds one or two keys and every internal node has one more child than
//! it has keys, with all leaves on the same level.
//!
//! Insertion adds the key to a leaf; a leaf that ends up with three keys splits in two and pushes
//! its middle key up into its parent, which may split in turn. Deletion always takes a key out of
//! a leaf (an internal key is first swapped for its in-order successor); a node left with no keys
//! borrows one through its parent from a sibling holding two, or else merges with a sibling,
//! taking the parent's separating key with it, which may leave the parent empty in turn. The
//! tree only grows or shrinks in height at the root.
//!
//! The recursive helpers report overflow and underflow to their caller through `Insertion` and
//! `Removal`, so a node holding three keys or none only ever exists inside the call that fixes
//! it.
//!
//! # Examples
//!
//! ```
//! use keytrees::collection::KeyCollection;
//! use keytrees::two_three::Tree;
//!
//! let mut tree = Tree::new();
//! for key in ["A", "B", "C", "D", "E"].iter() {
//!     tree.add((*key).to_owned());
//! }
//!
//! // Two splits have happened: a leaf, then the root.
//! assert_eq!(tree.stats().splits, 2);
//! assert_eq!(tree.height(), 2);
//! assert!(tree.validate().is_ok());
//!
//! assert!(tree.remove("C"));
//! assert_eq!(tree.in_order(), ["A", "B", "D", "E"]);
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::collection::KeyCollection;
use crate::error::Violation;
use crate::keys;

/// A balanced search tree of string keys built from 2-nodes and 3-nodes. Duplicate keys are kept.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    root: Option<Box<Node>>,
    len: usize,
    stats: Restructuring,
}

/// Counts of the rebalancing steps a [`Tree`] has performed over its lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Restructuring {
    /// Nodes that overflowed to three keys and were split in two.
    pub splits: usize,
    /// Empty nodes combined with a sibling and the key separating them.
    pub merges: usize,
    /// Keys rotated from a sibling, through the parent, into an empty node.
    pub redistributions: usize,
}

/// One or two keys in ascending order (three while overflowing, none while underflowing) and
/// either no children (a leaf) or exactly one more child than keys.
#[derive(Clone, Debug)]
struct Node {
    keys: Vec<String>,
    children: Vec<Box<Node>>,
}

/// What an insertion into a subtree left behind.
enum Insertion {
    /// The subtree absorbed the key.
    Settled,
    /// The subtree's root overflowed and was split. It now holds the left half and `right` the
    /// right half; `promoted` separates them and belongs in the parent.
    Split { promoted: String, right: Box<Node> },
}

/// What a removal from a subtree left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Removal {
    /// The key wasn't found so nothing changed.
    NotFound,
    /// A key was removed and the subtree is a valid 2-3 tree.
    Settled,
    /// A key was removed and the subtree's root is left with no keys (and, unless it's a leaf, a
    /// single child). The parent has to repair it.
    Underflow,
}

impl Node {
    fn leaf(key: String) -> Box<Self> {
        Box::new(Self {
            keys: vec![key],
            children: Vec::new(),
        })
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Which child a search for `key` continues into: left below the first key, right at or
    /// above the second, middle otherwise. For a leaf this is where `key` would be inserted.
    fn branch(&self, key: &str) -> usize {
        match &self.keys[..] {
            [first, ..] if keys::compare(key, first) == Ordering::Less => 0,
            [_, second] if keys::compare(key, second) != Ordering::Less => 2,
            _ => 1,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys
            .iter()
            .position(|k| keys::compare(k, key) == Ordering::Equal)
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of levels in the tree, which is the depth shared by every leaf; zero when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            height += 1;
            current = node.children.first().map(|c| &**c);
        }
        height
    }

    /// The rebalancing work done so far.
    pub fn stats(&self) -> Restructuring {
        self.stats
    }

    fn insert(&mut self, node: &mut Node, key: String) -> Insertion {
        let index = node.branch(&key);
        if node.is_leaf() {
            node.keys.insert(index, key);
        } else {
            match self.insert(&mut node.children[index], key) {
                Insertion::Settled => return Insertion::Settled,
                Insertion::Split { promoted, right } => {
                    node.keys.insert(index, promoted);
                    node.children.insert(index + 1, right);
                }
            }
        }

        if node.keys.len() > 2 {
            self.split(node)
        } else {
            Insertion::Settled
        }
    }

    /// Splits a node holding three keys (and four children, unless it's a leaf). The node keeps
    /// the smallest key and its two children.
    fn split(&mut self, node: &mut Node) -> Insertion {
        debug_assert_eq!(node.keys.len(), 3);
        let right_keys = node.keys.split_off(2);
        let promoted = node.keys.pop().unwrap_or_default();
        let right_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(2)
        };
        log::debug!(
            "two_three::Tree::split promoting {:?} between {:?} and {:?}",
            promoted,
            node.keys,
            right_keys
        );
        self.stats.splits += 1;

        Insertion::Split {
            promoted,
            right: Box::new(Node {
                keys: right_keys,
                children: right_children,
            }),
        }
    }

    fn delete(&mut self, node: &mut Node, key: &str) -> Removal {
        let found = node.position(key);
        if node.is_leaf() {
            return match found {
                None => Removal::NotFound,
                Some(slot) => {
                    node.keys.remove(slot);
                    if node.keys.is_empty() {
                        Removal::Underflow
                    } else {
                        Removal::Settled
                    }
                }
            };
        }

        let (index, removal) = match found {
            // An internal key is replaced by its in-order successor, the smallest key in the
            // subtree to its right, and that key is removed from its leaf instead.
            Some(slot) => {
                let (successor, removal) = self.delete_smallest(&mut node.children[slot + 1]);
                node.keys[slot] = successor;
                (slot + 1, removal)
            }
            None => {
                let index = node.branch(key);
                (index, self.delete(&mut node.children[index], key))
            }
        };

        match removal {
            Removal::Underflow => self.repair(node, index),
            other => other,
        }
    }

    /// Removes and returns the smallest key of a non-empty subtree.
    fn delete_smallest(&mut self, node: &mut Node) -> (String, Removal) {
        if node.is_leaf() {
            let key = node.keys.remove(0);
            let removal = if node.keys.is_empty() {
                Removal::Underflow
            } else {
                Removal::Settled
            };
            return (key, removal);
        }

        match self.delete_smallest(&mut node.children[0]) {
            (key, Removal::Underflow) => (key, self.repair(node, 0)),
            (key, _) => (key, Removal::Settled),
        }
    }

    /// Fixes `parent.children[index]`, which has just lost its last key. Borrows a key from a
    /// sibling with two if there is one, otherwise merges with a sibling. Returns
    /// [`Removal::Underflow`] if that merge took the parent's last key.
    fn repair(&mut self, parent: &mut Node, index: usize) -> Removal {
        debug_assert!(parent.children[index].keys.is_empty());

        if index > 0 && holds_two(&parent.children, index - 1) {
            self.redistribute_from_left(parent, index);
            return Removal::Settled;
        }
        if holds_two(&parent.children, index + 1) {
            self.redistribute_from_right(parent, index);
            return Removal::Settled;
        }

        self.merge(parent, index);
        if parent.keys.is_empty() {
            Removal::Underflow
        } else {
            Removal::Settled
        }
    }

    /// ```text
    ///     [ p ]             [ b ]
    ///     /   \     ->      /   \
    /// [a b]   [ ]         [a]   [p]
    /// ```
    fn redistribute_from_left(&mut self, parent: &mut Node, index: usize) {
        let (before, after) = parent.children.split_at_mut(index);
        let sibling = &mut before[index - 1];
        let node = &mut after[0];

        let Some(borrowed) = sibling.keys.pop() else {
            return;
        };
        let separator = mem::replace(&mut parent.keys[index - 1], borrowed);
        log::debug!(
            "two_three::Tree::redistribute_from_left moving {:?} down, {:?} up",
            separator,
            parent.keys[index - 1]
        );
        node.keys.insert(0, separator);
        if let Some(child) = sibling.children.pop() {
            node.children.insert(0, child);
        }
        self.stats.redistributions += 1;
    }

    /// ```text
    ///   [ p ]             [ a ]
    ///   /   \     ->      /   \
    /// [ ]   [a b]       [p]   [b]
    /// ```
    fn redistribute_from_right(&mut self, parent: &mut Node, index: usize) {
        let (before, after) = parent.children.split_at_mut(index + 1);
        let node = &mut before[index];
        let sibling = &mut after[0];

        let borrowed = sibling.keys.remove(0);
        let separator = mem::replace(&mut parent.keys[index], borrowed);
        log::debug!(
            "two_three::Tree::redistribute_from_right moving {:?} down, {:?} up",
            separator,
            parent.keys[index]
        );
        node.keys.push(separator);
        if !sibling.is_leaf() {
            node.children.push(sibling.children.remove(0));
        }
        self.stats.redistributions += 1;
    }

    /// Folds the empty node at `index` and the parent key beside it into a neighbouring sibling,
    /// which must hold a single key. The parent loses a key and a child.
    ///
    /// ```text
    ///     [ p ]
    ///     /   \      ->    [a p]
    ///   [a]   [ ]
    /// ```
    fn merge(&mut self, parent: &mut Node, index: usize) {
        let node = parent.children.remove(index);
        if index > 0 {
            let separator = parent.keys.remove(index - 1);
            log::debug!("two_three::Tree::merge pulling {:?} down left", separator);
            let sibling = &mut parent.children[index - 1];
            sibling.keys.push(separator);
            sibling.children.extend(node.children);
        } else {
            let separator = parent.keys.remove(0);
            log::debug!("two_three::Tree::merge pulling {:?} down right", separator);
            let sibling = &mut parent.children[0];
            sibling.keys.insert(0, separator);
            let mut children = node.children;
            children.append(&mut sibling.children);
            sibling.children = children;
        }
        self.stats.merges += 1;
    }
}

fn holds_two(children: &[Box<Node>], index: usize) -> bool {
    children.get(index).map_or(false, |sibling| sibling.keys.len() == 2)
}

fn collect_in_order<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
    for (i, key) in node.keys.iter().enumerate() {
        if let Some(child) = node.children.get(i) {
            collect_in_order(child, out);
        }
        out.push(key);
    }
    if let Some(last) = node.children.get(node.keys.len()) {
        collect_in_order(last, out);
    }
}

/// Checks node sizes and that every leaf sits at depth `leaf_depth`, which the first leaf found
/// fills in.
fn check_subtree(
    node: &Node,
    depth: usize,
    leaf_depth: &mut Option<usize>,
) -> Result<(), Violation> {
    let keys = node.keys.len();
    if !(1..=2).contains(&keys) {
        return Err(Violation::KeyCount(keys));
    }
    if node.is_leaf() {
        return match *leaf_depth {
            Some(expected) if expected != depth => Err(Violation::LeafDepth {
                expected,
                found: depth,
            }),
            _ => {
                *leaf_depth = Some(depth);
                Ok(())
            }
        };
    }
    if node.children.len() != keys + 1 {
        return Err(Violation::ChildCount {
            keys,
            children: node.children.len(),
        });
    }
    node.children
        .iter()
        .try_for_each(|child| check_subtree(child, depth + 1, leaf_depth))
}

impl KeyCollection for Tree {
    fn add(&mut self, key: String) {
        log::trace!("two_three::Tree::add({:?})", key);
        self.len += 1;
        let Some(mut root) = self.root.take() else {
            self.root = Some(Node::leaf(key));
            return;
        };

        if let Insertion::Split { promoted, right } = self.insert(&mut root, key) {
            // The only place the tree gets taller.
            log::debug!("two_three::Tree::add growing a new root {:?}", promoted);
            root = Box::new(Node {
                keys: vec![promoted],
                children: vec![root, right],
            });
        }
        self.root = Some(root);
    }

    fn remove(&mut self, key: &str) -> bool {
        log::trace!("two_three::Tree::remove({:?})", key);
        let Some(mut root) = self.root.take() else {
            return false;
        };

        let removal = self.delete(&mut root, key);
        self.root = if root.keys.is_empty() {
            // The only place the tree gets shorter: an emptied root is replaced by its only
            // child, or by nothing if it was a leaf.
            log::debug!("two_three::Tree::remove collapsing the root");
            root.children.pop()
        } else {
            Some(root)
        };

        if removal == Removal::NotFound {
            return false;
        }
        self.len -= 1;
        true
    }

    fn search(&self, key: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.position(key).is_some() {
                return true;
            }
            current = node.children.get(node.branch(key)).map(|c| &**c);
        }
        false
    }

    fn in_order(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            collect_in_order(root, &mut out);
        }
        out
    }

    fn len(&self) -> usize {
        self.len
    }

    fn validate(&self) -> Result<(), Violation> {
        if let Some(root) = &self.root {
            check_subtree(root, 1, &mut None)?;
        }
        let sorted = self.in_order();
        if sorted.len() != self.len {
            return Err(Violation::Length {
                recorded: self.len,
                counted: sorted.len(),
            });
        }
        keys::check_sorted(sorted)
    }
}
