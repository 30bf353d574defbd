use keytrees::collection::{KeyCollection, Variant};
use keytrees::keys::KeyGenerator;
use keytrees::{avl, bst, two_three};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn all_variants() -> Vec<(Variant, Box<dyn KeyCollection>)> {
    Variant::ALL.iter().map(|&v| (v, v.build())).collect()
}

#[test]
fn add_remove_search_scenario() {
    init_logging();
    for (variant, mut collection) in all_variants() {
        for key in ["B", "A", "C"].iter() {
            collection.add((*key).to_owned());
        }
        assert_eq!(collection.in_order(), ["A", "B", "C"], "{}", variant);

        assert!(collection.remove("B"), "{}", variant);
        assert_eq!(collection.in_order(), ["A", "C"], "{}", variant);
        assert!(!collection.search("B"), "{}", variant);
        assert!(collection.search("A"), "{}", variant);
        assert_eq!(collection.render(), "A C", "{}", variant);
        assert_eq!(collection.validate(), Ok(()), "{}", variant);
    }
}

#[test]
fn two_three_splits_keep_leaves_level() {
    init_logging();
    let mut tree = two_three::Tree::new();
    for key in ["A", "B", "C", "D", "E"].iter() {
        tree.add((*key).to_owned());
        assert_eq!(tree.validate(), Ok(()));
    }

    assert!(tree.stats().splits >= 1);
    assert_eq!(tree.height(), 2);
}

#[test]
fn avl_ascending_triple_rotates_once() {
    init_logging();
    let mut tree = avl::Tree::new();
    for key in ["A", "B", "C"].iter() {
        tree.add((*key).to_owned());
    }

    // Three nodes in two levels: "B" over "A" and "C" rather than a chain.
    assert_eq!(tree.rotations(), 1);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.in_order(), ["A", "B", "C"]);
}

#[test]
fn sorted_inserts_only_degrade_the_plain_bst() {
    init_logging();
    let keys: Vec<String> = (0..1000).map(|i| format!("{:04}", i)).collect();
    let mut plain = bst::Tree::new();
    let mut avl = avl::Tree::new();
    let mut two_three = two_three::Tree::new();
    for key in &keys {
        plain.add(key.clone());
        avl.add(key.clone());
        two_three.add(key.clone());
    }

    assert_eq!(plain.height(), 1000);
    assert!(avl.height() <= 14, "avl height {}", avl.height());
    assert!(two_three.height() <= 10, "2-3 height {}", two_three.height());
    assert_eq!(avl.validate(), Ok(()));
    assert_eq!(two_three.validate(), Ok(()));
}

#[test]
fn random_fill_agrees_across_variants() {
    init_logging();
    let mut collections = all_variants();
    for (_, collection) in collections.iter_mut() {
        collection.fill_random(10_000, &mut KeyGenerator::seeded(2024));
    }

    let expected: Vec<String> = collections[0]
        .1
        .in_order()
        .iter()
        .map(|k| k.to_string())
        .collect();
    assert_eq!(expected.len(), 10_000);
    for (variant, collection) in &collections {
        assert_eq!(collection.in_order(), expected, "{}", variant);
        assert_eq!(collection.validate(), Ok(()), "{}", variant);
    }
}

#[test]
fn drain_in_random_order() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(99);
    let mut keys: Vec<String> = KeyGenerator::seeded(5).take(2000).collect();

    let mut avl = avl::Tree::new();
    let mut two_three = two_three::Tree::new();
    for key in &keys {
        avl.add(key.clone());
        two_three.add(key.clone());
    }

    keys.shuffle(&mut rng);
    for (removed, key) in keys.iter().enumerate() {
        assert!(avl.remove(key), "avl lost {:?}", key);
        assert!(two_three.remove(key), "2-3 lost {:?}", key);
        if removed % 97 == 0 {
            assert_eq!(avl.validate(), Ok(()));
            assert_eq!(two_three.validate(), Ok(()));
        }
    }

    assert!(avl.is_empty() && two_three.is_empty());
    assert_eq!(avl.height(), 0);
    assert_eq!(two_three.height(), 0);
    assert!(two_three.stats().merges > 0);
    assert!(two_three.stats().redistributions > 0);
}

#[test]
fn absent_keys_are_not_errors() {
    init_logging();
    for (variant, mut collection) in all_variants() {
        assert!(!collection.search("A"), "{}", variant);
        assert!(!collection.remove("A"), "{}", variant);

        collection.add("M".to_owned());
        assert!(!collection.remove("N"), "{}", variant);
        assert_eq!(collection.in_order(), ["M"], "{}", variant);
    }
}
