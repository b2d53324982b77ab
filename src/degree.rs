//! Degree type and checked arithmetic for Fibonacci heap nodes.
//!
//! A node's degree is the number of children in its child ring. In a
//! Fibonacci heap a node of degree `d` roots a subtree of at least
//! `F(d + 2)` nodes (the Fibonacci numbers give the structure its name), so
//! the maximum degree is about `1.44 * log₂(n)`.
//!
//! A heap addressable on a 64-bit machine therefore never needs a degree
//! above ~93, and `u8` is ample. Storing it as `u8` keeps the node compact,
//! which matters since every node in the arena carries one.

/// Number of direct children of a node.
pub(crate) type Degree = u8;

/// Largest representable degree.
pub(crate) const MAX_DEGREE: Degree = u8::MAX;

/// Increments a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == MAX_DEGREE`. Reaching it would need a subtree of more
/// than `F(257)` nodes, so hitting this means the forest is corrupted.
#[inline]
pub(crate) fn checked_increment(degree: Degree) -> Degree {
    assert!(
        degree < MAX_DEGREE,
        "degree overflow: a Fibonacci heap node cannot legitimately exceed degree {}",
        MAX_DEGREE
    );
    degree + 1
}

/// Decrements a degree, saturating at zero.
#[inline]
pub(crate) fn saturating_decrement(degree: Degree) -> Degree {
    degree.saturating_sub(1)
}

/// Initial size of the consolidation table for a heap of `len` nodes.
///
/// This is `floor(log₂(len)) + 2`: one slot more than the classic sizing so
/// the common case never grows the table. Consolidation still grows it on
/// demand, so this is a capacity hint rather than a bound.
#[inline]
pub(crate) fn table_size_hint(len: usize) -> usize {
    match len.checked_ilog2() {
        Some(log) => log as usize + 2,
        None => 1,
    }
}
