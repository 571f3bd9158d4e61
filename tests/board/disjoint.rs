use rand::Rng;

use board_engine::games::go::DisjointSet;
use board_engine::util::tiny::consistent_rng;

fn roots(set: &DisjointSet) -> Vec<u16> {
    (0..set.len()).map(|i| set.root(i)).collect()
}

#[test]
fn singletons() {
    let set = DisjointSet::new(10);
    assert_eq!(set.len(), 10);
    assert_eq!(set.history_len(), 0);
    for i in 0..10 {
        assert!(set.is_root(i));
        assert_eq!(set.weight(i), 1);
    }
    set.assert_valid();
}

#[test]
fn heavier_root_wins() {
    let mut set = DisjointSet::new(10);
    set.connect(3, 4);
    set.connect(3, 5);

    // 7 is alone, so the three-element group keeps its root either way around
    let root = set.root(3);
    assert_eq!(set.connect(7, 5), root);
    assert_eq!(set.weight(7), 4);
    assert!(!set.is_root(7));

    set.undo_connect(7, 5);
    assert!(set.is_root(7));
    assert_eq!(set.weight(4), 3);
    set.assert_valid();
}

#[test]
fn atomize_then_undo() {
    let mut set = DisjointSet::new(6);
    set.connect(0, 1);
    set.connect(1, 2);
    set.connect(4, 5);
    let before = set.clone();

    set.atomize(&[2, 0, 1]);
    assert_eq!(set.history_len(), 4);
    for i in 0..3 {
        assert!(set.is_root(i));
        assert_eq!(set.weight(i), 1);
    }
    assert_eq!(set.weight(5), 2);
    set.assert_valid();

    set.undo_atomize(&[2, 0, 1]);
    assert_eq!(set, before);
}

#[test]
#[should_panic]
fn atomize_partial_component() {
    let mut set = DisjointSet::new(6);
    set.connect(0, 1);
    set.connect(1, 2);
    set.atomize(&[0, 1]);
}

#[test]
fn random_stack_undo() {
    let mut rng = consistent_rng();
    let mut set = DisjointSet::new(49);
    let start = set.clone();

    let mut done = vec![];
    let mut snapshots = vec![];
    while done.len() < 48 {
        let i = rng.gen_range(0..49);
        let j = rng.gen_range(0..49);
        if set.root(i) == set.root(j) {
            continue;
        }
        snapshots.push(roots(&set));
        set.connect(i, j);
        done.push((i, j));
    }

    // everything ends up in one component
    assert_eq!(set.weight(0), 49);
    set.assert_valid();

    while let Some((i, j)) = done.pop() {
        set.undo_connect(i, j);
        set.assert_valid();
        assert_eq!(Some(roots(&set)), snapshots.pop());
    }
    assert_eq!(set, start);
}

#[test]
fn clear_resets_everything() {
    let mut set = DisjointSet::new(8);
    set.connect(0, 1);
    set.connect(2, 3);
    set.atomize(&[2, 3]);

    set.clear();
    assert_eq!(set, DisjointSet::new(8));
}
