//! Circular doubly-linked rings over the node arena.
//!
//! Every level of a Fibonacci heap is a ring: the root list, and each node's
//! children. A ring is addressed through a *representative*, any one of its
//! members (`min` for the root list, `parent.child` for a child ring).
//!
//! The primitives here touch only the node being moved, its two neighbors,
//! and the representative. None of them compares keys. Because a child
//! ring's representative is stored inside the same arena these functions
//! mutate, the updated representative is returned to the caller instead of
//! being written through a `&mut` slot.

use crate::node::{Arena, NodeKey};

/// Splices the detached `node` into the ring represented by `rep`, placing
/// it directly to the right of `rep`.
///
/// With `rep == None` the node becomes a singleton ring. Returns the ring's
/// representative: `rep` itself, or `node` for a new ring.
pub(crate) fn insert_into_ring<T, P>(
    nodes: &mut Arena<T, P>,
    rep: Option<NodeKey>,
    node: NodeKey,
) -> NodeKey {
    match rep {
        None => {
            let n = &mut nodes[node];
            n.left = node;
            n.right = node;
            node
        }
        Some(rep) => {
            let rep_right = nodes[rep].right;
            {
                let n = &mut nodes[node];
                n.left = rep;
                n.right = rep_right;
            }
            nodes[rep_right].left = node;
            nodes[rep].right = node;
            rep
        }
    }
}

/// Splices `node` out of the ring represented by `rep`, leaving `node` as a
/// singleton.
///
/// Returns `None` if `node` was the only member, otherwise the ring's
/// representative, moved to `node`'s right neighbor if it was `node`.
pub(crate) fn remove_from_ring<T, P>(
    nodes: &mut Arena<T, P>,
    rep: NodeKey,
    node: NodeKey,
) -> Option<NodeKey> {
    let (left, right) = {
        let n = &nodes[node];
        (n.left, n.right)
    };

    if right == node {
        return None;
    }

    nodes[left].right = right;
    nodes[right].left = left;

    let n = &mut nodes[node];
    n.left = node;
    n.right = node;

    Some(if rep == node { right } else { rep })
}

/// Joins two disjoint rings into one.
///
/// The members of `b`'s ring are placed to the right of `a`, in ring order.
pub(crate) fn splice<T, P>(nodes: &mut Arena<T, P>, a: NodeKey, b: NodeKey) {
    let a_right = nodes[a].right;
    let b_left = nodes[b].left;

    nodes[a].right = b;
    nodes[b].left = a;
    nodes[b_left].right = a_right;
    nodes[a_right].left = b_left;
}

/// Snapshots the ring containing `start`, beginning at `start` and following
/// `right` links once around.
pub(crate) fn members<T, P>(nodes: &Arena<T, P>, start: NodeKey) -> Vec<NodeKey> {
    let mut out = Vec::new();
    let mut current = start;
    loop {
        out.push(current);
        current = nodes[current].right;
        if current == start {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use slotmap::SlotMap;

    fn arena_with(n: i32) -> (Arena<(), i32>, Vec<NodeKey>) {
        let mut nodes = SlotMap::with_key();
        let keys = (0..n).map(|i| nodes.insert(Node::new(i, ()))).collect();
        (nodes, keys)
    }

    fn assert_consistent(nodes: &Arena<(), i32>, start: NodeKey, expected_len: usize) {
        let ring = members(nodes, start);
        assert_eq!(ring.len(), expected_len);
        for &k in &ring {
            assert_eq!(nodes[nodes[k].right].left, k);
            assert_eq!(nodes[nodes[k].left].right, k);
        }
    }

    #[test]
    fn test_singleton_ring() {
        let (mut nodes, keys) = arena_with(1);
        let rep = insert_into_ring(&mut nodes, None, keys[0]);
        assert_eq!(rep, keys[0]);
        assert_eq!(nodes[keys[0]].left, keys[0]);
        assert_eq!(nodes[keys[0]].right, keys[0]);
        assert_eq!(members(&nodes, rep), vec![keys[0]]);
    }

    #[test]
    fn test_insert_places_right_of_rep() {
        let (mut nodes, keys) = arena_with(3);
        let mut rep = insert_into_ring(&mut nodes, None, keys[0]);
        rep = insert_into_ring(&mut nodes, Some(rep), keys[1]);
        rep = insert_into_ring(&mut nodes, Some(rep), keys[2]);

        assert_eq!(rep, keys[0]);
        assert_eq!(members(&nodes, rep), vec![keys[0], keys[2], keys[1]]);
        assert_consistent(&nodes, rep, 3);
    }

    #[test]
    fn test_remove_non_representative() {
        let (mut nodes, keys) = arena_with(3);
        let mut rep = insert_into_ring(&mut nodes, None, keys[0]);
        rep = insert_into_ring(&mut nodes, Some(rep), keys[1]);
        rep = insert_into_ring(&mut nodes, Some(rep), keys[2]);

        let rep = remove_from_ring(&mut nodes, rep, keys[1]);
        assert_eq!(rep, Some(keys[0]));
        assert_consistent(&nodes, keys[0], 2);
        assert_eq!(nodes[keys[1]].left, keys[1]);
        assert_eq!(nodes[keys[1]].right, keys[1]);
    }

    #[test]
    fn test_remove_representative_moves_right() {
        let (mut nodes, keys) = arena_with(2);
        let mut rep = insert_into_ring(&mut nodes, None, keys[0]);
        rep = insert_into_ring(&mut nodes, Some(rep), keys[1]);

        let rep = remove_from_ring(&mut nodes, rep, keys[0]);
        assert_eq!(rep, Some(keys[1]));
        assert_consistent(&nodes, keys[1], 1);
    }

    #[test]
    fn test_remove_last_member_empties_ring() {
        let (mut nodes, keys) = arena_with(1);
        let rep = insert_into_ring(&mut nodes, None, keys[0]);
        assert_eq!(remove_from_ring(&mut nodes, rep, keys[0]), None);
    }

    #[test]
    fn test_splice_joins_rings() {
        let (mut nodes, keys) = arena_with(5);
        let mut a = insert_into_ring(&mut nodes, None, keys[0]);
        a = insert_into_ring(&mut nodes, Some(a), keys[1]);
        let mut b = insert_into_ring(&mut nodes, None, keys[2]);
        b = insert_into_ring(&mut nodes, Some(b), keys[3]);
        b = insert_into_ring(&mut nodes, Some(b), keys[4]);

        splice(&mut nodes, a, b);
        assert_consistent(&nodes, a, 5);
        assert_eq!(
            members(&nodes, a),
            vec![keys[0], keys[2], keys[4], keys[3], keys[1]]
        );
    }

    #[test]
    fn test_splice_two_singletons() {
        let (mut nodes, keys) = arena_with(2);
        let a = insert_into_ring(&mut nodes, None, keys[0]);
        let b = insert_into_ring(&mut nodes, None, keys[1]);
        splice(&mut nodes, a, b);
        assert_consistent(&nodes, a, 2);
    }
}
