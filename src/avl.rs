//! An AVL tree. Every node caches the height of its subtree and, after each insertion or
//! deletion, the nodes on the path back up to the root are rotated as needed so that no node's
//! subtrees differ in height by more than one.
//!
//! Subtrees are passed around by value: the recursive operations take ownership of a subtree and
//! hand back the root of the rebalanced result.
//!
//! # Examples
//!
//! ```
//! use keytrees::avl::Tree;
//! use keytrees::collection::KeyCollection;
//!
//! let mut tree = Tree::new();
//!
//! // Ascending inserts would make a plain BST a chain.
//! for key in ["A", "B", "C", "D", "E", "F", "G"].iter() {
//!     tree.add((*key).to_owned());
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.in_order(), ["A", "B", "C", "D", "E", "F", "G"]);
//!
//! assert!(tree.remove("D"));
//! assert!(!tree.search("D"));
//!
//! // Removing something that isn't there does nothing.
//! assert!(!tree.remove("Q"));
//! assert_eq!(tree.len(), 6);
//! ```

use std::cmp::{self, Ordering};

use crate::collection::KeyCollection;
use crate::error::Violation;
use crate::keys;

type Link = Option<Box<Node>>;

/// A self-balancing Binary Search Tree of string keys. Duplicate keys are kept.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    root: Link,
    len: usize,
    rotations: usize,
}

#[derive(Clone, Debug)]
struct Node {
    key: String,
    left: Link,
    right: Link,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

impl Node {
    fn new(key: String) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of levels in the tree; zero when empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// How many single rotations have been performed over the tree's lifetime. A double rotation
    /// counts as two.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    fn insert(&mut self, link: Link, key: String) -> Box<Node> {
        match link {
            None => Node::new(key),
            Some(mut node) => {
                // Equal keys go right.
                if keys::compare(&key, &node.key) == Ordering::Less {
                    node.left = Some(self.insert(node.left.take(), key));
                } else {
                    node.right = Some(self.insert(node.right.take(), key));
                }
                self.balance(node)
            }
        }
    }

    /// Returns the new root of the subtree and whether a key was removed.
    fn delete(&mut self, link: Link, key: &str) -> (Link, bool) {
        let Some(mut node) = link else {
            return (None, false);
        };

        let deleted = match keys::compare(key, &node.key) {
            Ordering::Less => {
                let (new_left, deleted) = self.delete(node.left.take(), key);
                node.left = new_left;
                deleted
            }
            Ordering::Greater => {
                let (new_right, deleted) = self.delete(node.right.take(), key);
                node.right = new_right;
                deleted
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // Both children (if any) are already balanced so they can stand in directly.
                (None, child) | (child, None) => return (child, true),

                // With two children, this node takes over its successor's key: the smallest key
                // of the right subtree.
                (left, Some(right)) => {
                    let (successor, new_right) = self.delete_smallest(right);
                    node.key = successor;
                    node.left = left;
                    node.right = new_right;
                    true
                }
            },
        };

        if !deleted {
            return (Some(node), false);
        }
        (Some(self.balance(node)), true)
    }

    /// Returns the smallest key in the subtree and the rebalanced subtree without it.
    fn delete_smallest(&mut self, mut node: Box<Node>) -> (String, Link) {
        match node.left.take() {
            None => {
                let Node { key, right, .. } = *node;
                (key, right)
            }
            Some(left) => {
                let (key, new_left) = self.delete_smallest(left);
                node.left = new_left;
                (key, Some(self.balance(node)))
            }
        }
    }

    /// Refreshes the node's cached height and rotates it if its subtrees differ in height by two.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn balance(&mut self, mut node: Box<Node>) -> Box<Node> {
        node.fix_height();
        let balanced = match node.balance_factor() {
            2 => {
                if node.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
                    node.left = node.left.take().map(|left| self.rotate_left(left));
                }
                self.rotate_right(node)
            }
            -2 => {
                if node.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
                    node.right = node.right.take().map(|right| self.rotate_right(right));
                }
                self.rotate_left(node)
            }
            _ => node,
        };

        if cfg!(debug_assertions) {
            let left_height = height(&balanced.left);
            let right_height = height(&balanced.right);
            debug_assert_eq!(balanced.height, left_height.max(right_height) + 1);
            debug_assert!(left_height.abs_diff(right_height) <= 1);
        }
        balanced
    }

    /// Rotates the left child up to become the root of this subtree. Its right subtree becomes
    /// the old root's left subtree.
    ///
    /// ```text
    ///      old_root            new_root
    ///       /    \              /    \
    ///   new_root  z    ->      x   old_root
    ///    /  \                        /  \
    ///   x    y                      y    z
    /// ```
    fn rotate_right(&mut self, mut old_root: Box<Node>) -> Box<Node> {
        let Some(mut new_root) = old_root.left.take() else {
            return old_root;
        };
        log::debug!("avl::Tree::rotate_right at {:?}", old_root.key);
        self.rotations += 1;

        old_root.left = new_root.right.take();
        old_root.fix_height();
        new_root.right = Some(old_root);
        new_root.fix_height();
        new_root
    }

    /// Mirror image of [`Tree::rotate_right`]: the right child moves up and its left subtree
    /// becomes the old root's right subtree.
    fn rotate_left(&mut self, mut old_root: Box<Node>) -> Box<Node> {
        let Some(mut new_root) = old_root.right.take() else {
            return old_root;
        };
        log::debug!("avl::Tree::rotate_left at {:?}", old_root.key);
        self.rotations += 1;

        old_root.right = new_root.left.take();
        old_root.fix_height();
        new_root.left = Some(old_root);
        new_root.fix_height();
        new_root
    }
}

fn collect_in_order<'a>(link: &'a Link, out: &mut Vec<&'a str>) {
    if let Some(node) = link {
        collect_in_order(&node.left, out);
        out.push(&node.key);
        collect_in_order(&node.right, out);
    }
}

/// Recomputes the height of every subtree, checking it against the cached heights and the
/// balance requirement.
fn check_subtree(link: &Link) -> Result<usize, Violation> {
    let Some(node) = link else {
        return Ok(0);
    };
    let left = check_subtree(&node.left)?;
    let right = check_subtree(&node.right)?;
    let actual = cmp::max(left, right) + 1;
    if node.height != actual {
        return Err(Violation::Height {
            key: node.key.clone(),
            cached: node.height,
            actual,
        });
    }
    if left.abs_diff(right) > 1 {
        return Err(Violation::Unbalanced {
            key: node.key.clone(),
            left,
            right,
        });
    }
    Ok(actual)
}

impl KeyCollection for Tree {
    fn add(&mut self, key: String) {
        log::trace!("avl::Tree::add({:?})", key);
        let root = self.root.take();
        self.root = Some(self.insert(root, key));
        self.len += 1;
    }

    fn remove(&mut self, key: &str) -> bool {
        log::trace!("avl::Tree::remove({:?})", key);
        let root = self.root.take();
        let (new_root, deleted) = self.delete(root, key);
        self.root = new_root;
        if deleted {
            self.len -= 1;
        }
        deleted
    }

    fn search(&self, key: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match keys::compare(key, &node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    fn in_order(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        collect_in_order(&self.root, &mut out);
        out
    }

    fn len(&self) -> usize {
        self.len
    }

    fn validate(&self) -> Result<(), Violation> {
        check_subtree(&self.root)?;
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
