#[macro_use]
extern crate quickcheck_macros;

mod balanced;
mod baselines;

use keytrees::KeyCollection;
use quickcheck::{Arbitrary, Gen};

/// A short key over a tiny alphabet so that random operations keep hitting keys that are
/// already present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Key(pub String);

impl Arbitrary for Key {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = *g.choose(&[1, 1, 2, 3]).unwrap();
        Key((0..len)
            .map(|_| *g.choose(&['A', 'B', 'C', 'D', 'E']).unwrap())
            .collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().filter(|s| !s.is_empty()).map(Key))
    }
}

/// An enum for the various kinds of "things" to do to
/// collections in a quicktest.
#[derive(Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Remove the K from the data structure
    Remove(K),
    /// Compare the in-order keys
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are the most
    /// likely so collections grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k) => Box::new(k.shrink().map(Op::Insert)),
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
            Op::Iter => quickcheck::empty_shrinker(),
        }
    }
}

/// Applies a set of operations to a collection and to a sorted `Vec`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes both hold the same keys, and that the collection's
/// invariants held after every single step.
pub(crate) fn do_ops(ops: &[Op<Key>], collection: &mut dyn KeyCollection) -> bool {
    let mut model: Vec<String> = Vec::new();
    for op in ops {
        let agrees = match op {
            Op::Insert(Key(k)) => {
                collection.add(k.clone());
                let at = model.partition_point(|m| m <= k);
                model.insert(at, k.clone());
                true
            }
            Op::Remove(Key(k)) => {
                let expected = match model.iter().position(|m| m == k) {
                    Some(i) => {
                        model.remove(i);
                        true
                    }
                    None => false,
                };
                collection.remove(k) == expected
            }
            Op::Iter => collection.in_order() == model,
        };

        if !agrees || collection.len() != model.len() || collection.validate().is_err() {
            return false;
        }
    }

    model.iter().all(|k| collection.search(k)) && collection.in_order() == model
}
