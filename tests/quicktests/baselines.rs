use keytrees::collection::{KeyCollection, Variant};
use keytrees::{bst, linked_list, sorted_vec};

use crate::{do_ops, Key, Op};

#[quickcheck]
fn fuzz_linked_list(ops: Vec<Op<Key>>) -> bool {
    do_ops(&ops, &mut linked_list::SortedList::new())
}

#[quickcheck]
fn fuzz_sorted_vec(ops: Vec<Op<Key>>) -> bool {
    do_ops(&ops, &mut sorted_vec::SortedVec::new())
}

#[quickcheck]
fn fuzz_bst(ops: Vec<Op<Key>>) -> bool {
    do_ops(&ops, &mut bst::Tree::new())
}

/// Every variant driven by the same operations ends up holding the same keys.
#[quickcheck]
fn variants_agree(ops: Vec<Op<Key>>) -> bool {
    let mut collections: Vec<Box<dyn KeyCollection>> =
        Variant::ALL.iter().map(|v| v.build()).collect();

    for op in &ops {
        let mut results = collections.iter_mut().map(|c| match op {
            Op::Insert(Key(k)) => {
                c.add(k.clone());
                true
            }
            Op::Remove(Key(k)) => c.remove(k),
            Op::Iter => c.is_empty(),
        });
        let Some(first) = results.next() else {
            return false;
        };
        if !results.all(|r| r == first) {
            return false;
        }
    }

    let expected = collections[0].in_order();
    collections.iter().all(|c| c.in_order() == expected)
}
