use ordered_tree::{NodeRef, Order, Tree, TreeError};

use std::collections::BTreeSet;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same values in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                bst.insert(v.clone());
                set.insert(v.clone());
            }
            Op::Remove(v) => {
                let _ = bst.remove(v);
                set.remove(v);
            }
        }
    }
}

fn in_order<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut values = Vec::new();
    tree.in_order(|v| values.push(v.clone()));
    values
}

/// Every child points back at its parent and sits on the correct side of it.
fn links_are_consistent<T: Ord>(tree: &Tree<T>) -> bool {
    fn check<T: Ord>(node: NodeRef<'_, T>) -> bool {
        let left_ok = node.left().map_or(true, |left| {
            left.value() < node.value() && left.parent() == Some(node) && check(left)
        });
        let right_ok = node.right().map_or(true, |right| {
            right.value() > node.value() && right.parent() == Some(node) && check(right)
        });
        left_ok && right_ok
    }

    tree.root().map_or(true, |root| root.is_root() && check(root))
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    in_order(&tree) == set.into_iter().collect::<Vec<_>>() && links_are_consistent(&tree)
}

#[quickcheck]
fn in_order_is_strictly_increasing(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();

    in_order(&tree).windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn node_count_matches_distinct_inserts(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut distinct = BTreeSet::new();
    for x in &xs {
        if tree.insert(*x) != distinct.insert(*x) {
            return false;
        }
    }

    tree.node_count() == distinct.len()
}

#[quickcheck]
fn reinserting_is_rejected(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let count = tree.node_count();

    xs.iter().all(|x| !tree.insert(*x)) && tree.node_count() == count
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut present: BTreeSet<_> = xs.into_iter().collect();

    for remove in &removes {
        let before = tree.node_count();
        let expected = if present.remove(remove) {
            Ok(*remove)
        } else if before == 0 {
            Err(TreeError::EmptyTree)
        } else {
            Err(TreeError::NotFound)
        };
        let removed = tree.remove(remove);

        let expected_count = if removed.is_ok() { before - 1 } else { before };
        if removed != expected || tree.node_count() != expected_count || tree.contains(remove) {
            return false;
        }
    }

    present.iter().all(|x| tree.contains(x)) && links_are_consistent(&tree)
}

#[quickcheck]
fn leaves_plus_internal_nodes_is_node_count(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    if tree.is_empty() {
        return tree.leaves_count() == 0;
    }

    let mut internal = 0;
    let mut stack = vec![tree.root().unwrap()];
    while let Some(node) = stack.pop() {
        if !node.is_leaf() {
            internal += 1;
        }
        stack.extend(node.left());
        stack.extend(node.right());
    }

    tree.leaves_count() >= 1 && tree.leaves_count() + internal == tree.node_count()
}

#[quickcheck]
fn chains_have_height_one_less_than_length(len: u8) -> bool {
    let ascending: Tree<_> = (0..len).collect();
    let descending: Tree<_> = (0..len).rev().collect();
    let expected = isize::from(len) - 1;

    ascending.height() == expected && descending.height() == expected
}

#[quickcheck]
fn removing_two_child_root_keeps_order(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    let Some(root) = tree.root() else {
        return true;
    };
    if root.left().is_none() || root.right().is_none() {
        return true;
    }
    let root_value = *root.value();
    let predecessor = *root.left().unwrap().rightmost().value();

    let mut expected = in_order(&tree);
    expected.retain(|v| *v != root_value);

    tree.remove(&root_value) == Ok(root_value)
        && tree.root().map(|n| *n.value()) == Some(predecessor)
        && in_order(&tree) == expected
        && links_are_consistent(&tree)
}

#[quickcheck]
fn traversals_visit_every_value_once(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let sorted = in_order(&tree);

    [Order::Pre, Order::Post].into_iter().all(|order| {
        let mut values = Vec::new();
        tree.traverse(order, |v| values.push(*v));
        values.sort_unstable();
        values == sorted
    })
}

#[quickcheck]
fn clone_matches_original(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let copy = tree.clone();

    let mut original_pre = Vec::new();
    tree.pre_order(|v| original_pre.push(*v));
    let mut copy_pre = Vec::new();
    copy.pre_order(|v| copy_pre.push(*v));

    original_pre == copy_pre && links_are_consistent(&copy)
}
