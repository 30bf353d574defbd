use keytrees::collection::KeyCollection;
use keytrees::{avl, two_three};
use quickcheck::TestResult;

use crate::{do_ops, Key, Op};

fn build<C: KeyCollection + Default>(keys: &[Key]) -> C {
    let mut collection = C::default();
    for Key(k) in keys {
        collection.add(k.clone());
    }
    collection
}

#[quickcheck]
fn fuzz_avl(ops: Vec<Op<Key>>) -> bool {
    do_ops(&ops, &mut avl::Tree::new())
}

#[quickcheck]
fn fuzz_two_three(ops: Vec<Op<Key>>) -> bool {
    do_ops(&ops, &mut two_three::Tree::new())
}

#[quickcheck]
fn contains_not(xs: Vec<Key>, nots: Vec<Key>) -> bool {
    let avl: avl::Tree = build(&xs);
    let two_three: two_three::Tree = build(&xs);

    nots.iter()
        .filter(|k| !xs.contains(k))
        .all(|Key(k)| !avl.search(k) && !two_three.search(k))
}

#[quickcheck]
fn absent_removal_is_noop(xs: Vec<Key>, missing: Key) -> TestResult {
    if xs.contains(&missing) {
        return TestResult::discard();
    }

    let mut avl: avl::Tree = build(&xs);
    let mut two_three: two_three::Tree = build(&xs);
    let avl_before: Vec<String> = avl.in_order().iter().map(|k| k.to_string()).collect();
    let two_three_before: Vec<String> =
        two_three.in_order().iter().map(|k| k.to_string()).collect();
    let (rotations, stats) = (avl.rotations(), two_three.stats());

    TestResult::from_bool(
        !avl.remove(&missing.0)
            && !two_three.remove(&missing.0)
            && avl.in_order() == avl_before
            && two_three.in_order() == two_three_before
            && avl.rotations() == rotations
            && two_three.stats() == stats,
    )
}

#[quickcheck]
fn insertion_order_is_irrelevant(xs: Vec<Key>) -> bool {
    let mut reversed = xs.clone();
    reversed.reverse();
    let mut sorted = xs.clone();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let avl: avl::Tree = build(&xs);
    let two_three: two_three::Tree = build(&xs);
    let expected = avl.in_order();

    [&reversed, &sorted].iter().all(|keys| {
        build::<avl::Tree>(keys).in_order() == expected
            && build::<two_three::Tree>(keys).in_order() == expected
    }) && two_three.in_order() == expected
}

#[quickcheck]
fn heights_stay_logarithmic(xs: Vec<Key>) -> bool {
    let avl: avl::Tree = build(&xs);
    let two_three: two_three::Tree = build(&xs);
    let n = xs.len() as f64;

    // An AVL tree is at most ~1.44 lg(n + 2) tall; a 2-3 tree at most lg(n + 1).
    avl.height() as f64 <= 1.45 * (n + 2.0).log2()
        && two_three.height() as f64 <= (n + 1.0).log2() + 1e-9
}

#[quickcheck]
fn with_deletions(xs: Vec<Key>, deletes: Vec<Key>) -> bool {
    let mut avl: avl::Tree = build(&xs);
    let mut two_three: two_three::Tree = build(&xs);

    let mut still_present = xs;
    for delete in &deletes {
        let expected = match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                true
            }
            None => false,
        };
        if avl.remove(&delete.0) != expected || two_three.remove(&delete.0) != expected {
            return false;
        }
    }

    avl.validate().is_ok()
        && two_three.validate().is_ok()
        && still_present
            .iter()
            .all(|Key(k)| avl.search(k) && two_three.search(k))
}
