//! A sorted singly-linked list. Every operation is a linear walk from the head.

use std::cmp::Ordering;

use crate::collection::KeyCollection;
use crate::keys;

type Link = Option<Box<ListNode>>;

/// Keys kept in ascending order in a singly-linked list. Duplicate keys are kept.
#[derive(Debug, Default)]
pub struct SortedList {
    head: Link,
    len: usize,
}

#[derive(Debug)]
struct ListNode {
    key: String,
    next: Link,
}

impl Drop for SortedList {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl SortedList {
    /// Generates a new, empty `SortedList`.
    pub fn new() -> Self {
        Self::default()
    }

    fn iter(&self) -> impl Iterator<Item = &ListNode> {
        std::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
    }
}

impl KeyCollection for SortedList {
    fn add(&mut self, key: String) {
        log::trace!("SortedList::add({:?})", key);
        // Walk past every key that isn't greater, so the new key lands after its duplicates.
        let mut cursor = &mut self.head;
        while cursor
            .as_deref()
            .map_or(false, |node| keys::compare(&node.key, &key) != Ordering::Greater)
        {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        let next = cursor.take();
        *cursor = Some(Box::new(ListNode { key, next }));
        self.len += 1;
    }

    fn remove(&mut self, key: &str) -> bool {
        log::trace!("SortedList::remove({:?})", key);
        let mut cursor = &mut self.head;
        while cursor
            .as_deref()
            .map_or(false, |node| keys::compare(&node.key, key) == Ordering::Less)
        {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }

        match cursor.take() {
            Some(node) if keys::compare(&node.key, key) == Ordering::Equal => {
                *cursor = node.next;
                self.len -= 1;
                true
            }
            // Put back whatever was there.
            other => {
                *cursor = other;
                false
            }
        }
    }

    fn search(&self, key: &str) -> bool {
        self.iter()
            .take_while(|node| keys::compare(&node.key, key) != Ordering::Greater)
            .any(|node| node.key == key)
    }

    fn in_order(&self) -> Vec<&str> {
        self.iter().map(|node| node.key.as_str()).collect()
    }

    fn len(&self) -> usize {
        self.len
    }
}
