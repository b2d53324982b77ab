//! Orderings for heap priorities.
//!
//! A heap orders its priorities through a [`Compare`] implementation. The
//! default is [`NaturalOrder`], which uses the priority type's `Ord`.
//! [`ReverseOrder`] turns any heap into a max-heap, and [`FnComparator`]
//! accepts an arbitrary closure.
//!
//! ```rust
//! use rust_fibonacci_heap::compare::FnComparator;
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//!
//! // Order strings by length, shortest first
//! let mut heap = FibonacciHeap::with_comparator(FnComparator(|a: &String, b: &String| {
//!     a.len().cmp(&b.len())
//! }));
//! heap.push("three".to_string(), 3);
//! heap.push("one".to_string(), 1);
//! assert_eq!(heap.pop(), Some(("one".to_string(), 1)));
//! ```

use std::cmp::Ordering;

/// A total order over `P`.
///
/// Implementations must be consistent: antisymmetric, transitive, and stable
/// for the lifetime of the heap. Ties are allowed; the heap breaks them on
/// its own.
pub trait Compare<P: ?Sized> {
    /// Compares two priorities.
    fn compare(&self, a: &P, b: &P) -> Ordering;

    /// Returns true if `a` is strictly less than `b`.
    #[inline]
    fn less(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// The priority type's own `Ord`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<P: Ord + ?Sized> Compare<P> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of the priority type's `Ord`, giving max-heap behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReverseOrder;

impl<P: Ord + ?Sized> Compare<P> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        b.cmp(a)
    }
}

/// A closure used as a comparator.
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<P: ?Sized, F> Compare<P> for FnComparator<F>
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnComparator")
    }
}
