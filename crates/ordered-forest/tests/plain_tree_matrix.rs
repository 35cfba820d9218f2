use ordered_forest::{Match, PlainTree, Side, TreeError};

fn asc(a: &i32, b: &i32) -> Side {
    a.cmp(b).into()
}

fn matcher(a: &i32, b: &i32) -> Match {
    a.cmp(b).into()
}

fn tree_of(values: &[i32]) -> PlainTree<i32> {
    let mut tree = PlainTree::new();
    for &v in values {
        tree.add(v, asc);
    }
    tree
}

fn flat(tree: &PlainTree<i32>) -> Vec<i32> {
    tree.flatten().into_iter().copied().collect()
}

fn node(tree: &PlainTree<i32>, value: i32) -> u32 {
    tree.find(&value, matcher)
        .unwrap_or_else(|| panic!("{value} not found"))
}

fn check(tree: &PlainTree<i32>) {
    if let Err(err) = tree.assert_valid() {
        panic!("invalid plain tree: {err}\n{}", tree.print());
    }
}

//          50
//       /      \
//     30        70
//    /  \      /  \
//   20  40    60  80
fn fixture() -> PlainTree<i32> {
    tree_of(&[50, 30, 70, 20, 40, 60, 80])
}

#[test]
fn plain_add_keeps_in_order_matrix() {
    let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 35, 45, 65]);
    assert_eq!(tree.len(), 10);
    assert_eq!(flat(&tree), vec![20, 30, 35, 40, 45, 50, 60, 65, 70, 80]);
    check(&tree);

    let dupes = tree_of(&[5, 5, 5]);
    assert_eq!(flat(&dupes), vec![5, 5, 5]);
    assert_eq!(dupes.height(), 3);
}

#[test]
fn plain_add_links_parent_and_side_matrix() {
    let tree = fixture();
    let root = tree.root().unwrap();
    assert_eq!(tree.value(root), Some(&50));
    assert_eq!(tree.parent(root), None);
    assert_eq!(tree.side(root), None);

    let n40 = node(&tree, 40);
    assert_eq!(tree.parent(n40), Some(node(&tree, 30)));
    assert_eq!(tree.side(n40), Some(Side::High));
    assert_eq!(tree.child(node(&tree, 70), Side::Low), Some(node(&tree, 60)));
}

#[test]
fn plain_add_from_matrix() {
    let mut tree = fixture();
    let n30 = node(&tree, 30);
    let added = tree.add_from(n30, 35, asc).unwrap();
    assert_eq!(tree.parent(added), Some(node(&tree, 40)));
    assert_eq!(tree.side(added), Some(Side::Low));
    assert_eq!(tree.len(), 8);

    assert_eq!(tree.add_from(999, 1, asc), None);
    assert_eq!(tree.len(), 8);
    check(&tree);
}

#[test]
fn plain_find_matrix() {
    let tree = fixture();
    for v in [20, 30, 40, 50, 60, 70, 80] {
        assert_eq!(tree.value(node(&tree, v)), Some(&v));
    }
    assert_eq!(tree.find(&55, matcher), None);
    assert_eq!(PlainTree::<i32>::new().find(&1, matcher), None);
}

#[test]
fn plain_balance_degenerate_chain() {
    let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.height(), 7);
    assert_eq!(tree.leaf_imbalance(), 0);

    tree.balance();
    let root = tree.root().unwrap();
    assert_eq!(tree.value(root), Some(&4));
    assert_eq!(tree.height(), 3);
    assert!(tree.leaf_imbalance() <= 1);
    assert_eq!(flat(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.len(), 7);
    check(&tree);
}

#[test]
fn plain_balance_height_bound_matrix() {
    for n in 1..=64 {
        let values: Vec<i32> = (0..n).collect();
        let mut tree = tree_of(&values);
        tree.balance();
        let bound = (usize::BITS - (n as usize).leading_zeros()) as usize;
        assert!(tree.height() <= bound, "n={n}: {} > {bound}", tree.height());
        assert!(tree.leaf_imbalance() <= 1, "n={n}");
        assert_eq!(flat(&tree), values);
        check(&tree);
    }
}

#[test]
fn plain_split_scenario() {
    let mut tree = tree_of(&[50, 60, 40]);
    let n50 = node(&tree, 50);
    let n40 = node(&tree, 40);

    let kept = tree.split(n50, Side::Low, |_| (49, 50)).unwrap();
    assert_eq!(kept, n50);
    assert_eq!(tree.value(n50), Some(&50));
    assert_eq!(tree.len(), 4);

    let n49 = tree.child(n50, Side::Low).unwrap();
    assert_eq!(tree.value(n49), Some(&49));
    assert_eq!(tree.parent(n49), Some(n50));
    assert_eq!(tree.child(n49, Side::Low), Some(n40));
    assert_eq!(tree.parent(n40), Some(n49));

    assert_eq!(tree.find(&49, matcher), Some(n49));
    assert_eq!(tree.find(&50, matcher), Some(n50));
    assert_eq!(tree.find(&40, matcher), Some(n40));
    assert_eq!(flat(&tree), vec![40, 49, 50, 60]);
    check(&tree);
}

#[test]
fn plain_split_on_high_side() {
    let mut tree = tree_of(&[50, 70]);
    let n50 = node(&tree, 50);
    let n70 = node(&tree, 70);

    tree.split(n50, Side::High, |v| (v, v + 1)).unwrap();
    assert_eq!(tree.value(n50), Some(&50));
    let n51 = tree.child(n50, Side::High).unwrap();
    assert_eq!(tree.value(n51), Some(&51));
    assert_eq!(tree.child(n51, Side::High), Some(n70));
    assert_eq!(flat(&tree), vec![50, 51, 70]);
    check(&tree);
}

#[test]
fn plain_split_vacant_node() {
    let mut tree = tree_of(&[1]);
    assert_eq!(
        tree.split(7, Side::Low, |v| (v, v)),
        Err(TreeError::VacantNode(7))
    );
    assert_eq!(tree.len(), 1);
}

#[test]
fn plain_split_with_panicking_splitter_leaves_node_vacant() {
    let mut tree = tree_of(&[50, 30]);
    let n50 = node(&tree, 50);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        tree.split(n50, Side::Low, |_| -> (i32, i32) { panic!("splitter failed") })
    }));
    assert!(result.is_err());

    assert!(!tree.is_live(n50));
    assert_eq!(tree.value(n50), None);
    assert_eq!(tree.len(), 2);
    assert_eq!(
        tree.assert_valid(),
        Err(TreeError::BrokenParentLink { node: n50 })
    );

    tree.clear();
    check(&tree);
}

type Span = (i32, i32);

fn by_start(a: &Span, b: &Span) -> Side {
    a.0.cmp(&b.0).into()
}

fn cut_at(at: i32) -> impl FnOnce(Span) -> (Span, Span) {
    move |(lo, hi)| ((lo, at), (at, hi))
}

#[test]
fn plain_split_add_spans() {
    let mut tree = PlainTree::new();
    let whole = tree.add((0, 100), by_start);

    let (kept, added) = tree
        .split_add((25, 26), whole, Side::Low, cut_at(50), by_start)
        .unwrap();
    assert_eq!(kept, whole);
    assert_eq!(tree.value(whole), Some(&(50, 100)));

    let low = tree.child(whole, Side::Low).unwrap();
    assert_eq!(tree.value(low), Some(&(0, 50)));
    assert_eq!(tree.parent(added), Some(low));
    assert_eq!(tree.side(added), Some(Side::High));

    let spans: Vec<Span> = tree.flatten().into_iter().copied().collect();
    assert_eq!(spans, vec![(0, 50), (25, 26), (50, 100)]);
    assert_eq!(tree.len(), 3);
    tree.assert_valid().unwrap();
}

#[test]
fn plain_remove_leaf() {
    let mut tree = fixture();
    let n20 = node(&tree, 20);
    assert_eq!(tree.remove(n20, Side::High), Ok(20));
    assert_eq!(flat(&tree), vec![30, 40, 50, 60, 70, 80]);
    assert_eq!(tree.child(node(&tree, 30), Side::Low), None);
    assert_eq!(tree.len(), 6);
    check(&tree);
}

#[test]
fn plain_remove_two_children_reattaches_low_subtree() {
    let mut tree = fixture();
    let n30 = node(&tree, 30);
    assert_eq!(tree.remove(n30, Side::High), Ok(30));

    let n40 = node(&tree, 40);
    assert_eq!(tree.parent(n40), tree.root());
    assert_eq!(tree.child(n40, Side::Low), Some(node(&tree, 20)));
    assert_eq!(flat(&tree), vec![20, 40, 50, 60, 70, 80]);
    assert_eq!(tree.len(), 6);
    check(&tree);
}

#[test]
fn plain_remove_root() {
    let mut tree = fixture();
    let root = tree.root().unwrap();
    assert_eq!(tree.remove(root, Side::High), Ok(50));

    let new_root = tree.root().unwrap();
    assert_eq!(tree.value(new_root), Some(&70));
    assert_eq!(tree.parent(new_root), None);
    // Low subtree now hangs below the smallest value of the old high side.
    assert_eq!(tree.parent(node(&tree, 30)), Some(node(&tree, 60)));
    assert_eq!(flat(&tree), vec![20, 30, 40, 60, 70, 80]);
    check(&tree);
}

#[test]
fn plain_remove_with_low_as_high_side() {
    let mut tree = fixture();
    let n70 = node(&tree, 70);
    assert_eq!(tree.remove(n70, Side::Low), Ok(70));

    let n60 = node(&tree, 60);
    assert_eq!(tree.child(tree.root().unwrap(), Side::High), Some(n60));
    assert_eq!(tree.child(n60, Side::High), Some(node(&tree, 80)));
    assert_eq!(flat(&tree), vec![20, 30, 40, 50, 60, 80]);
    check(&tree);
}

#[test]
fn plain_remove_single_child_on_low_side() {
    let mut tree = tree_of(&[50, 30, 20]);
    let n30 = node(&tree, 30);
    assert_eq!(tree.remove(n30, Side::High), Ok(30));
    assert_eq!(tree.parent(node(&tree, 20)), tree.root());
    assert_eq!(flat(&tree), vec![20, 50]);
    check(&tree);

    let mut only = tree_of(&[1]);
    let root = only.root().unwrap();
    assert_eq!(only.remove(root, Side::Low), Ok(1));
    assert!(only.is_empty());
    assert_eq!(only.len(), 0);
    assert_eq!(only.remove(root, Side::Low), Err(TreeError::VacantNode(root)));
}

#[test]
fn plain_cull_matrix() {
    let mut tree = fixture();
    let root = tree.root().unwrap();
    assert_eq!(tree.cull(root, Side::Low), 3);
    assert_eq!(tree.len(), 4);
    assert_eq!(flat(&tree), vec![50, 60, 70, 80]);
    assert_eq!(tree.find(&20, matcher), None);
    check(&tree);

    assert_eq!(tree.cull(root, Side::Low), 0);
    let n80 = node(&tree, 80);
    assert_eq!(tree.cull(n80, Side::High), 0);
    assert_eq!(tree.len(), 4);

    // Culled slots are handed out again.
    let reused = tree.add(10, asc);
    assert!(reused < 7);
    assert_eq!(tree.len(), 5);
    check(&tree);
}

#[test]
fn plain_leaf_imbalance_matrix() {
    assert_eq!(PlainTree::<i32>::new().leaf_imbalance(), 0);
    assert_eq!(tree_of(&[1]).leaf_imbalance(), 0);
    assert_eq!(tree_of(&[50, 30, 70, 20]).leaf_imbalance(), 1);
    assert_eq!(tree_of(&[50, 30, 70, 20, 10, 5]).leaf_imbalance(), 3);
    assert_eq!(fixture().leaf_imbalance(), 0);
}

#[test]
fn plain_neighbours_matrix() {
    let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 35, 45, 65]);

    let mut forward = Vec::new();
    let mut curr = tree.first();
    while let Some(i) = curr {
        forward.push(*tree.value(i).unwrap());
        curr = tree.next(i);
    }
    assert_eq!(forward, flat(&tree));

    let mut backward = Vec::new();
    let mut curr = tree.last();
    while let Some(i) = curr {
        backward.push(*tree.value(i).unwrap());
        curr = tree.prev(i);
    }
    backward.reverse();
    assert_eq!(backward, forward);

    let first = tree.first().unwrap();
    let last = tree.last().unwrap();
    for v in &forward {
        let n = node(&tree, *v);
        if n != first {
            assert_eq!(tree.next(tree.prev(n).unwrap()), Some(n));
        }
        if n != last {
            assert_eq!(tree.prev(tree.next(n).unwrap()), Some(n));
        }
    }
}

#[test]
fn plain_traverse_depths_matrix() {
    let tree = fixture();
    let mut seen = Vec::new();
    tree.traverse(|i, depth| seen.push((*tree.value(i).unwrap(), depth)));
    assert_eq!(
        seen,
        vec![(20, 2), (30, 1), (40, 2), (50, 0), (60, 2), (70, 1), (80, 2)]
    );
}

#[test]
fn plain_clear() {
    let mut tree = fixture();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(tree.flatten().is_empty());
    tree.add(1, asc);
    assert_eq!(tree.root(), Some(0));
}
