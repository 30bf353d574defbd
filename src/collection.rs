//! The contract every collection in this crate implements, and a registry of the
//! implementations so they can be driven side by side.
//!
//! # Examples
//!
//! ```
//! use keytrees::collection::Variant;
//! use keytrees::keys::KeyGenerator;
//!
//! let mut collections: Vec<_> = Variant::ALL.iter().map(|v| v.build()).collect();
//! for collection in &mut collections {
//!     // Same seed, same keys, for every variant.
//!     collection.fill_random(100, &mut KeyGenerator::seeded(3));
//! }
//!
//! let expected = collections[0].in_order();
//! assert!(collections.iter().all(|c| c.in_order() == expected));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{UnknownVariant, Violation};
use crate::keys::{self, KeyGenerator};
use crate::{avl, bst, linked_list, sorted_vec, two_three};

/// An ordered multiset of string keys.
pub trait KeyCollection {
    /// Inserts `key`. Inserting a key that is already present stores another copy.
    fn add(&mut self, key: String);

    /// Removes one copy of `key`. Returns `false`, leaving the collection untouched, when there
    /// was nothing to remove.
    fn remove(&mut self, key: &str) -> bool;

    /// Whether at least one copy of `key` is stored.
    fn search(&self, key: &str) -> bool;

    /// Every stored key in ascending order. Computed afresh on each call.
    fn in_order(&self) -> Vec<&str>;

    /// How many keys (counting duplicates) are stored.
    fn len(&self) -> usize;

    /// Whether no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The keys in order separated by single spaces.
    fn render(&self) -> String {
        self.in_order().join(" ")
    }

    /// Inserts `count` keys drawn from `keys`.
    fn fill_random(&mut self, count: usize, keys: &mut KeyGenerator) {
        log::trace!("fill_random: {} keys", count);
        for key in keys.by_ref().take(count) {
            self.add(key);
        }
    }

    /// Checks the collection's invariants. The default checks that keys enumerate in order and
    /// that `len` agrees with them; structures with more shape to them check that too.
    fn validate(&self) -> Result<(), Violation> {
        let sorted = self.in_order();
        if sorted.len() != self.len() {
            return Err(Violation::Length {
                recorded: self.len(),
                counted: sorted.len(),
            });
        }
        keys::check_sorted(sorted)
    }
}

/// The collections available for comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// [`linked_list::SortedList`].
    LinkedList,
    /// [`sorted_vec::SortedVec`].
    SortedVec,
    /// [`bst::Tree`].
    PlainBst,
    /// [`avl::Tree`].
    Avl,
    /// [`two_three::Tree`].
    TwoThree,
}

impl Variant {
    /// Every variant, simplest first.
    pub const ALL: [Variant; 5] = [
        Variant::LinkedList,
        Variant::SortedVec,
        Variant::PlainBst,
        Variant::Avl,
        Variant::TwoThree,
    ];

    /// A short, stable name, also accepted by [`Variant::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Variant::LinkedList => "linked-list",
            Variant::SortedVec => "sorted-vec",
            Variant::PlainBst => "bst",
            Variant::Avl => "avl",
            Variant::TwoThree => "two-three",
        }
    }

    /// A new, empty collection of this variant.
    pub fn build(self) -> Box<dyn KeyCollection> {
        match self {
            Variant::LinkedList => Box::new(linked_list::SortedList::new()),
            Variant::SortedVec => Box::new(sorted_vec::SortedVec::new()),
            Variant::PlainBst => Box::new(bst::Tree::new()),
            Variant::Avl => Box::new(avl::Tree::new()),
            Variant::TwoThree => Box::new(two_three::Tree::new()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| UnknownVariant(s.to_owned()))
    }
}
