//! A plain, unbalanced Binary Search Tree. Its shape depends entirely on insertion order: keys
//! inserted in ascending order produce a chain. Every operation walks the tree iteratively so a
//! chain of any length is safe to build, search and drop.
//!
//! # Examples
//!
//! ```
//! use keytrees::bst::Tree;
//! use keytrees::collection::KeyCollection;
//!
//! let mut tree = Tree::new();
//! for key in ["A", "B", "C", "D"].iter() {
//!     tree.add((*key).to_owned());
//! }
//!
//! // Nothing rebalances a plain BST.
//! assert_eq!(tree.height(), 4);
//! assert!(tree.search("C"));
//! ```

use std::cmp::Ordering;

use crate::collection::KeyCollection;
use crate::keys;

type Link = Option<Box<Node>>;

/// An unbalanced Binary Search Tree of string keys. Duplicate keys are kept.
#[derive(Debug, Default)]
pub struct Tree {
    root: Link,
    len: usize,
}

#[derive(Debug)]
struct Node {
    key: String,
    left: Link,
    right: Link,
}

impl Drop for Tree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of levels on the longest path from the root; zero when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }
}

/// Unlinks the smallest node of the subtree at `link`, returning its key.
fn take_smallest(link: &mut Link) -> Option<String> {
    let mut cursor = link;
    while cursor.as_deref().map_or(false, |n| n.left.is_some()) {
        if let Some(node) = cursor {
            cursor = &mut node.left;
        }
    }
    let Node { key, right, .. } = *cursor.take()?;
    *cursor = right;
    Some(key)
}

impl KeyCollection for Tree {
    fn add(&mut self, key: String) {
        log::trace!("bst::Tree::add({:?})", key);
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            // Equal keys go right.
            cursor = match keys::compare(&key, &node.key) {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }
        *cursor = Some(Box::new(Node {
            key,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    fn remove(&mut self, key: &str) -> bool {
        log::trace!("bst::Tree::remove({:?})", key);
        let mut cursor = &mut self.root;
        loop {
            let ordering = match cursor.as_deref() {
                None => return false,
                Some(node) => keys::compare(key, &node.key),
            };
            if ordering == Ordering::Equal {
                break;
            }
            if let Some(node) = cursor {
                cursor = if ordering == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }

        let Some(node) = cursor.take() else {
            return false;
        };
        let Node { left, right, .. } = *node;
        *cursor = match (left, right) {
            (None, child) | (child, None) => child,
            // Two children: the in-order successor takes the removed node's place.
            (left, right) => {
                let mut right = right;
                let successor = take_smallest(&mut right);
                successor.map(|key| Box::new(Node { key, left, right }))
            }
        };
        self.len -= 1;
        true
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
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push(node.key.as_str());
            current = node.right.as_deref();
        }
        out
    }

    fn len(&self) -> usize {
        self.len
    }
}
